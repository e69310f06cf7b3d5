//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Opaque handle of the caller's edge record, carried through to path results
pub type EdgeRef = u64;

/// A dense, integer-indexed view of an undirected graph using Compressed Sparse Row (CSR) format.
///
/// Every undirected edge is stored twice, once in the adjacency row of each
/// endpoint, and both copies carry the same [`EdgeRef`].
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub out_targets: Vec<usize>,
    /// Edge handles: aligned with `out_targets`
    pub edge_refs: Vec<EdgeRef>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Range of CSR positions holding the adjacency row of `idx`
    pub fn row(&self, idx: usize) -> std::ops::Range<usize> {
        self.out_offsets[idx]..self.out_offsets[idx + 1]
    }

    /// Weight stored at a CSR position, 1.0 for unweighted views
    pub fn weight_at(&self, pos: usize) -> f64 {
        self.weights.as_ref().map(|w| w[pos]).unwrap_or(1.0)
    }

    /// Build a view from per-node adjacency rows of `(neighbor_index, weight, edge_ref)`.
    ///
    /// Rows are taken as given: callers building an undirected view list each
    /// edge under both endpoints.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        adjacency: Vec<Vec<(usize, f64, EdgeRef)>>,
        weighted: bool,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &node)| (node, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut edge_refs = Vec::new();
        let mut flat_weights = if weighted { Some(Vec::new()) } else { None };

        out_offsets.push(0);
        for row in adjacency.into_iter().take(node_count) {
            for (target, weight, edge_ref) in row {
                out_targets.push(target);
                edge_refs.push(edge_ref);
                if let Some(ref mut w_flat) = flat_weights {
                    w_flat.push(weight);
                }
            }
            out_offsets.push(out_targets.len());
        }
        // Rows missing from `adjacency` are isolated nodes
        while out_offsets.len() < node_count + 1 {
            out_offsets.push(out_targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            edge_refs,
            weights: flat_weights,
        }
    }
}
