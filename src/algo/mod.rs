//! Path queries over the connection graph
//!
//! Algorithms are implemented in the `scholia-graph-algorithms` crate.
//! This module provides the integration/adapter layer: it flattens the
//! connection graph into a [`GraphView`] and maps algorithm results back to
//! oriented [`Connection`]s.

use crate::graph::{AffiliationId, Connection, ConnectionGraph, ConnectionId, Path, PathWithDist, ScholiaStore};
use scholia_graph_algorithms::{GraphView, NodeId as AlgoNodeId};
use rustc_hash::FxHashMap;

// Re-export algorithms
pub use scholia_graph_algorithms::{bfs, dfs, dijkstra, minimax_path, PathResult};

/// Dense snapshot of the connection graph for algorithm execution
///
/// Algorithm node ids are positions in `affiliations`; edge refs are
/// [`ConnectionId`]s. Edge weights are the co-authorship weights.
#[derive(Debug, Clone)]
pub struct ConnectionView {
    pub view: GraphView,
    affiliations: Vec<AffiliationId>,
    positions: FxHashMap<AffiliationId, AlgoNodeId>,
}

impl ConnectionView {
    /// Build a view of every affiliation known to the connection graph
    pub fn build(graph: &ConnectionGraph) -> Self {
        let affiliations: Vec<AffiliationId> = graph.nodes().cloned().collect();
        let positions: FxHashMap<AffiliationId, AlgoNodeId> = affiliations
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx as AlgoNodeId))
            .collect();

        // Each undirected connection appears in the row of both endpoints
        let adjacency: Vec<Vec<(usize, f64, u64)>> = affiliations
            .iter()
            .map(|id| {
                graph
                    .incident(id)
                    .iter()
                    .filter_map(|&edge_id| graph.edge(edge_id))
                    .filter_map(|edge| {
                        positions
                            .get(edge.other(id))
                            .map(|&idx| (idx as usize, edge.weight() as f64, edge.id().as_u64()))
                    })
                    .collect()
            })
            .collect();

        let index_to_node = (0..affiliations.len() as AlgoNodeId).collect();
        let view = GraphView::from_adjacency_list(index_to_node, adjacency, true);

        ConnectionView {
            view,
            affiliations,
            positions,
        }
    }

    /// Algorithm node id of an affiliation
    pub fn node_of(&self, id: &AffiliationId) -> Option<AlgoNodeId> {
        self.positions.get(id).copied()
    }

    /// Affiliation behind an algorithm node id
    pub fn affiliation_of(&self, node: AlgoNodeId) -> Option<&AffiliationId> {
        self.affiliations.get(node as usize)
    }

    /// Translate a path result into connections oriented in travel direction
    pub fn to_path(&self, graph: &ConnectionGraph, result: &PathResult) -> Path {
        result
            .edges
            .iter()
            .zip(&result.path)
            .filter_map(|(&edge_ref, &node)| {
                let from = self.affiliation_of(node)?;
                graph
                    .edge(ConnectionId(edge_ref))
                    .map(|edge| edge.oriented_from(from))
            })
            .collect()
    }
}

impl ScholiaStore {
    /// Run `algorithm` between two distinct stored affiliations
    fn find_path<F>(&self, source: &AffiliationId, target: &AffiliationId, algorithm: F) -> Path
    where
        F: Fn(&GraphView, AlgoNodeId, AlgoNodeId) -> Option<PathResult>,
    {
        if source == target || !self.has_affiliation(source) || !self.has_affiliation(target) {
            return Path::new();
        }

        let view = ConnectionView::build(self.connections());
        let (Some(from), Some(to)) = (view.node_of(source), view.node_of(target)) else {
            return Path::new();
        };

        algorithm(&view.view, from, to)
            .map(|result| view.to_path(self.connections(), &result))
            .unwrap_or_default()
    }

    /// Some simple path from `source` to `target` found depth first.
    ///
    /// Empty when `source == target`, when either is unknown or when no path exists.
    pub fn get_any_path(&self, source: &AffiliationId, target: &AffiliationId) -> Path {
        self.find_path(source, target, dfs)
    }

    /// Path with the fewest connections
    pub fn get_path_with_least_affiliations(&self, source: &AffiliationId, target: &AffiliationId) -> Path {
        self.find_path(source, target, bfs)
    }

    /// Path whose heaviest connection is as light as possible, ties by fewest connections
    pub fn get_path_of_least_friction(&self, source: &AffiliationId, target: &AffiliationId) -> Path {
        self.find_path(source, target, minimax_path)
    }

    /// Path with the smallest total weight.
    ///
    /// Each step carries the accumulated weight from `source` after traversing it.
    pub fn get_shortest_path(&self, source: &AffiliationId, target: &AffiliationId) -> PathWithDist {
        let mut total = 0;
        self.find_path(source, target, dijkstra)
            .into_iter()
            .map(|connection: Connection| {
                total += connection.weight;
                (connection, total)
            })
            .collect()
    }
}
