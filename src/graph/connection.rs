//! Co-authorship connection graph
//!
//! Two affiliations are connected when they appear together on at least one
//! publication; the weight of the connection is the number of such
//! publications. Each undirected connection is stored once as a canonical
//! [`ConnectionEdge`] in an arena, and the per-affiliation adjacency lists
//! hold [`ConnectionId`]s into that arena, so a weight update is visible from
//! both endpoints at once.

use super::types::{AffiliationId, Distance, Weight, NO_WEIGHT};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A connection as seen from `aff1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub aff1: AffiliationId,
    pub aff2: AffiliationId,
    pub weight: Weight,
}

impl Connection {
    pub fn new(aff1: AffiliationId, aff2: AffiliationId, weight: Weight) -> Self {
        Connection { aff1, aff2, weight }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]- {}", self.aff1, self.weight, self.aff2)
    }
}

/// Sequence of traversed connections, each oriented in travel direction
pub type Path = Vec<Connection>;

/// Path whose steps carry the accumulated distance from the start
pub type PathWithDist = Vec<(Connection, Distance)>;

/// Unique identifier for a stored connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

/// Canonical undirected connection; endpoints are kept in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEdge {
    id: ConnectionId,
    low: AffiliationId,
    high: AffiliationId,
    weight: Weight,
}

impl ConnectionEdge {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Endpoints in ascending order
    pub fn endpoints(&self) -> (&AffiliationId, &AffiliationId) {
        (&self.low, &self.high)
    }

    /// The endpoint that is not `from`
    pub fn other(&self, from: &AffiliationId) -> &AffiliationId {
        if self.low == *from {
            &self.high
        } else {
            &self.low
        }
    }

    /// Value copy of this connection seen from `from`
    pub fn oriented_from(&self, from: &AffiliationId) -> Connection {
        Connection {
            aff1: from.clone(),
            aff2: self.other(from).clone(),
            weight: self.weight,
        }
    }
}

fn ordered_pair(a: &AffiliationId, b: &AffiliationId) -> (AffiliationId, AffiliationId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Weighted undirected graph of affiliations
#[derive(Debug, Default)]
pub struct ConnectionGraph {
    /// Edge arena indexed by ConnectionId
    edges: Vec<Option<ConnectionEdge>>,

    /// Free connection IDs for reuse
    free_ids: Vec<u64>,

    /// Ordered endpoint pair -> edge
    pair_index: FxHashMap<(AffiliationId, AffiliationId), ConnectionId>,

    /// Incident edges for each affiliation, in creation order
    adjacency: IndexMap<AffiliationId, Vec<ConnectionId>, FxBuildHasher>,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an affiliation with no connections (no-op if already present)
    pub fn ensure_node(&mut self, id: &AffiliationId) {
        if !self.adjacency.contains_key(id) {
            self.adjacency.insert(id.clone(), Vec::new());
        }
    }

    /// Record one more shared publication between `a` and `b`.
    ///
    /// Returns the new weight, or `None` for a self pair.
    pub fn link(&mut self, a: &AffiliationId, b: &AffiliationId) -> Option<Weight> {
        if a == b {
            return None;
        }

        let key = ordered_pair(a, b);
        if let Some(&id) = self.pair_index.get(&key) {
            let edge = self.edges[id.0 as usize].as_mut()?;
            edge.weight += 1;
            return Some(edge.weight);
        }

        let id_u64 = if let Some(id) = self.free_ids.pop() {
            id
        } else {
            self.edges.push(None);
            (self.edges.len() - 1) as u64
        };
        let id = ConnectionId(id_u64);

        self.adjacency.entry(key.0.clone()).or_default().push(id);
        self.adjacency.entry(key.1.clone()).or_default().push(id);
        self.edges[id_u64 as usize] = Some(ConnectionEdge {
            id,
            low: key.0.clone(),
            high: key.1.clone(),
            weight: 1,
        });
        self.pair_index.insert(key, id);
        Some(1)
    }

    /// Link every unordered pair of distinct affiliations in `members`
    pub fn link_all(&mut self, members: &[AffiliationId]) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                self.link(a, b);
            }
        }
    }

    /// Link a newly added member against each existing member
    pub fn link_one(&mut self, newcomer: &AffiliationId, members: &[AffiliationId]) {
        for member in members {
            self.link(newcomer, member);
        }
    }

    /// Record one shared publication less between `a` and `b`, dropping the
    /// connection when no shared publication remains.
    ///
    /// Returns the remaining weight, or `None` if there was no connection.
    pub fn unlink(&mut self, a: &AffiliationId, b: &AffiliationId) -> Option<Weight> {
        let key = ordered_pair(a, b);
        let id = *self.pair_index.get(&key)?;
        let edge = self.edges[id.0 as usize].as_mut()?;
        edge.weight -= 1;
        let remaining = edge.weight;
        if remaining <= 0 {
            self.remove_edge(id);
        }
        Some(remaining.max(0))
    }

    /// Unlink every unordered pair of distinct affiliations in `members`
    pub fn unlink_all(&mut self, members: &[AffiliationId]) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                self.unlink(a, b);
            }
        }
    }

    fn remove_edge(&mut self, id: ConnectionId) -> Option<ConnectionEdge> {
        let edge = self.edges.get_mut(id.0 as usize)?.take()?;
        self.free_ids.push(id.0);
        self.pair_index.remove(&(edge.low.clone(), edge.high.clone()));
        for endpoint in [&edge.low, &edge.high] {
            if let Some(adj) = self.adjacency.get_mut(endpoint) {
                adj.retain(|&eid| eid != id);
            }
        }
        Some(edge)
    }

    /// Remove an affiliation and every connection incident to it.
    ///
    /// Returns the number of removed connections.
    pub fn remove_node(&mut self, id: &AffiliationId) -> usize {
        let incident = match self.adjacency.shift_remove(id) {
            Some(incident) => incident,
            None => return 0,
        };
        incident
            .into_iter()
            .filter_map(|edge_id| self.remove_edge(edge_id))
            .count()
    }

    /// Get a stored connection by ID
    pub fn edge(&self, id: ConnectionId) -> Option<&ConnectionEdge> {
        self.edges.get(id.0 as usize).and_then(|e| e.as_ref())
    }

    /// Weight between `a` and `b`, [`NO_WEIGHT`] if not connected
    pub fn weight(&self, a: &AffiliationId, b: &AffiliationId) -> Weight {
        self.pair_index
            .get(&ordered_pair(a, b))
            .and_then(|&id| self.edge(id))
            .map(|edge| edge.weight)
            .unwrap_or(NO_WEIGHT)
    }

    /// Connection between `a` and `b` seen from `a`
    pub fn connection_between(&self, a: &AffiliationId, b: &AffiliationId) -> Option<Connection> {
        let id = self.pair_index.get(&ordered_pair(a, b))?;
        self.edge(*id).map(|edge| edge.oriented_from(a))
    }

    /// Incident edges of an affiliation
    pub fn incident(&self, id: &AffiliationId) -> &[ConnectionId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All connections incident to `id`, oriented from `id`
    pub fn connections_of(&self, id: &AffiliationId) -> Vec<Connection> {
        self.incident(id)
            .iter()
            .filter_map(|&edge_id| self.edge(edge_id))
            .map(|edge| edge.oriented_from(id))
            .collect()
    }

    /// Every connection once per direction, grouped by endpoint
    pub fn all_directed(&self) -> Vec<Connection> {
        self.adjacency
            .keys()
            .flat_map(|id| self.connections_of(id))
            .collect()
    }

    /// Every connection once, oriented from its smaller endpoint
    pub fn all_undirected(&self) -> Vec<Connection> {
        self.edges
            .iter()
            .flatten()
            .map(|edge| edge.oriented_from(&edge.low))
            .collect()
    }

    /// Affiliations known to the graph, in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &AffiliationId> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected connections
    pub fn edge_count(&self) -> usize {
        self.pair_index.len()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.free_ids.clear();
        self.pair_index.clear();
        self.adjacency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aff(id: &str) -> AffiliationId {
        AffiliationId::new(id)
    }

    #[test]
    fn test_link_creates_symmetric_connection() {
        let mut graph = ConnectionGraph::new();
        assert_eq!(graph.link(&aff("b"), &aff("a")), Some(1));

        let from_a = graph.connections_of(&aff("a"));
        let from_b = graph.connections_of(&aff("b"));
        assert_eq!(from_a, vec![Connection::new(aff("a"), aff("b"), 1)]);
        assert_eq!(from_b, vec![Connection::new(aff("b"), aff("a"), 1)]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_link_increments_both_directions() {
        let mut graph = ConnectionGraph::new();
        graph.link(&aff("a"), &aff("b"));
        assert_eq!(graph.link(&aff("b"), &aff("a")), Some(2));

        assert_eq!(graph.weight(&aff("a"), &aff("b")), 2);
        assert_eq!(graph.connections_of(&aff("b"))[0].weight, 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_pair_ignored() {
        let mut graph = ConnectionGraph::new();
        assert_eq!(graph.link(&aff("a"), &aff("a")), None);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.weight(&aff("a"), &aff("a")), NO_WEIGHT);
    }

    #[test]
    fn test_link_all_pairs() {
        let mut graph = ConnectionGraph::new();
        graph.link_all(&[aff("a"), aff("b"), aff("c")]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.all_directed().len(), 6);
        assert_eq!(graph.all_undirected().len(), 3);
        for conn in graph.all_undirected() {
            assert!(conn.aff1 < conn.aff2);
        }
    }

    #[test]
    fn test_unlink_drops_edge_at_zero() {
        let mut graph = ConnectionGraph::new();
        graph.link(&aff("a"), &aff("b"));
        graph.link(&aff("a"), &aff("b"));

        assert_eq!(graph.unlink(&aff("b"), &aff("a")), Some(1));
        assert_eq!(graph.weight(&aff("a"), &aff("b")), 1);
        assert_eq!(graph.unlink(&aff("a"), &aff("b")), Some(0));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.connections_of(&aff("a")).is_empty());
        assert_eq!(graph.unlink(&aff("a"), &aff("b")), None);
    }

    #[test]
    fn test_remove_node() {
        let mut graph = ConnectionGraph::new();
        graph.link_all(&[aff("a"), aff("b"), aff("c")]);
        assert_eq!(graph.remove_node(&aff("b")), 2);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.connections_of(&aff("a")), vec![Connection::new(aff("a"), aff("c"), 1)]);
        assert!(graph.connections_of(&aff("b")).is_empty());
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_connection_ids_are_reused() {
        let mut graph = ConnectionGraph::new();
        graph.link(&aff("a"), &aff("b"));
        let first = graph.incident(&aff("a"))[0];
        graph.unlink(&aff("a"), &aff("b"));

        graph.link(&aff("c"), &aff("d"));
        assert_eq!(graph.incident(&aff("c"))[0], first);
        assert_eq!(graph.edge(first).unwrap().endpoints(), (&aff("c"), &aff("d")));
    }

    #[test]
    fn test_connection_display() {
        let conn = Connection::new(aff("a"), aff("b"), 3);
        assert_eq!(format!("{}", conn), "a -[3]- b");
    }
}
