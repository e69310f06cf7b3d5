//! Pathfinding algorithms
//!
//! Depth-first reachability, breadth-first fewest-hops, Dijkstra weighted
//! shortest path and minimax (bottleneck) paths over a [`GraphView`].

use super::common::{EdgeRef, GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Visited nodes, `source` first and `target` last
    pub path: Vec<NodeId>,
    /// Traversed edges; `edges[i]` joins `path[i]` and `path[i + 1]`
    pub edges: Vec<EdgeRef>,
    /// Algorithm-specific cost: hop count, total weight or bottleneck weight
    pub cost: f64,
}

/// Walk a parent table (`node -> (previous node, CSR position)`) back from `target_idx`
fn reconstruct(
    view: &GraphView,
    parent: &[Option<(usize, usize)>],
    source_idx: usize,
    target_idx: usize,
) -> (Vec<NodeId>, Vec<EdgeRef>) {
    let mut path = vec![view.index_to_node[target_idx]];
    let mut edges = Vec::new();
    let mut curr = target_idx;
    while curr != source_idx {
        match parent[curr] {
            Some((prev, pos)) => {
                edges.push(view.edge_refs[pos]);
                path.push(view.index_to_node[prev]);
                curr = prev;
            }
            None => break,
        }
    }
    path.reverse();
    edges.reverse();
    (path, edges)
}

/// Depth-First Search (any simple path)
///
/// Neighbors are explored in adjacency order and the first path that reaches
/// `target` is returned. The result is not necessarily the shortest one.
pub fn dfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut visited = vec![false; view.node_count];
    // (node index, next CSR position to try)
    let mut stack = vec![(source_idx, view.out_offsets[source_idx])];
    // CSR positions of the edges on the current branch
    let mut branch: Vec<usize> = Vec::new();
    visited[source_idx] = true;

    while let Some(frame) = stack.last_mut() {
        let node_idx = frame.0;
        if node_idx == target_idx {
            let path = stack.iter().map(|&(idx, _)| view.index_to_node[idx]).collect();
            let edges = branch.iter().map(|&pos| view.edge_refs[pos]).collect();
            let cost = branch.iter().map(|&pos| view.weight_at(pos)).sum();
            return Some(PathResult { source, target, path, edges, cost });
        }

        if frame.1 < view.out_offsets[node_idx + 1] {
            let pos = frame.1;
            frame.1 += 1;
            let next_idx = view.out_targets[pos];
            if !visited[next_idx] {
                visited[next_idx] = true;
                branch.push(pos);
                stack.push((next_idx, view.out_offsets[next_idx]));
            }
        } else {
            stack.pop();
            branch.pop();
        }
    }

    None
}

/// Breadth-first search restricted to edges accepted by `allow`
fn bfs_filtered<F>(view: &GraphView, source: NodeId, target: NodeId, allow: F) -> Option<PathResult>
where
    F: Fn(f64) -> bool,
{
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut queue = VecDeque::new();
    let mut visited = vec![false; view.node_count];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; view.node_count];

    queue.push_back(source_idx);
    visited[source_idx] = true;

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let (path, edges) = reconstruct(view, &parent, source_idx, target_idx);
            return Some(PathResult {
                source,
                target,
                cost: edges.len() as f64,
                path,
                edges,
            });
        }

        for pos in view.row(current_idx) {
            let next_idx = view.out_targets[pos];
            if !visited[next_idx] && allow(view.weight_at(pos)) {
                visited[next_idx] = true;
                parent[next_idx] = Some((current_idx, pos));
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// `cost` is the number of traversed edges.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    bfs_filtered(view, source, target, |_| true)
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap, lower index first on ties
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Label-setting search shared by Dijkstra and the minimax variant.
///
/// `extend(cost_so_far, edge_weight)` yields the cost of the extended path and
/// must never decrease it.
fn best_first<F>(view: &GraphView, source: NodeId, target: NodeId, extend: F) -> Option<PathResult>
where
    F: Fn(f64, f64) -> f64,
{
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut dist = vec![f64::INFINITY; view.node_count];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; view.node_count];
    let mut heap = BinaryHeap::new();

    dist[source_idx] = 0.0;
    heap.push(State { cost: 0.0, node_idx: source_idx });

    while let Some(State { cost, node_idx }) = heap.pop() {
        if node_idx == target_idx {
            let (path, edges) = reconstruct(view, &parent, source_idx, target_idx);
            return Some(PathResult { source, target, path, edges, cost });
        }

        if cost > dist[node_idx] {
            continue;
        }

        for pos in view.row(node_idx) {
            let weight = view.weight_at(pos);
            if weight < 0.0 {
                continue;
            }

            let next_idx = view.out_targets[pos];
            let next_cost = extend(cost, weight);

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some((node_idx, pos));
                heap.push(State { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    None
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from GraphView if available, otherwise assumes 1.0.
/// Negative weights are skipped.
pub fn dijkstra(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    best_first(view, source, target, |cost, weight| cost + weight)
}

/// Minimax path: minimise the largest edge weight along the path.
///
/// Runs a bottleneck Dijkstra to find the smallest achievable maximum weight,
/// then a BFS over the edges not heavier than that bound so that among all
/// minimax paths the one with the fewest edges is returned. `cost` is the
/// bottleneck weight (0.0 when `source == target`).
pub fn minimax_path(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let bottleneck = best_first(view, source, target, f64::max)?.cost;
    let mut result = bfs_filtered(view, source, target, |weight| weight >= 0.0 && weight <= bottleneck)?;
    result.cost = bottleneck;
    Some(result)
}
