//! B-Tree based coordinate index for exact and nearest-neighbor lookups

use crate::graph::{AffiliationId, Coord, DistanceKey};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Index from location to the affiliations placed there
#[derive(Debug, Clone, Default)]
pub struct CoordIndex {
    /// Coord -> Set of AffiliationIds
    index: BTreeMap<Coord, BTreeSet<AffiliationId>>,
}

impl CoordIndex {
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, coord: Coord, id: AffiliationId) {
        self.index.entry(coord).or_default().insert(id);
    }

    pub fn remove(&mut self, coord: &Coord, id: &AffiliationId) {
        if let Some(ids) = self.index.get_mut(coord) {
            ids.remove(id);
            if ids.is_empty() {
                self.index.remove(coord);
            }
        }
    }

    /// All affiliations at `coord`, in id order
    pub fn get(&self, coord: &Coord) -> Vec<AffiliationId> {
        self.index
            .get(coord)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Smallest affiliation id at `coord`
    pub fn first(&self, coord: &Coord) -> Option<&AffiliationId> {
        self.index.get(coord).and_then(|ids| ids.first())
    }

    /// Up to `k` affiliations nearest to `target`, nearest first.
    ///
    /// Ties are broken by coordinate (y, then x) and then by id.
    pub fn nearest(&self, target: &Coord, k: usize) -> Vec<AffiliationId> {
        if k == 0 {
            return Vec::new();
        }

        // Max-heap holding the k best candidates seen so far
        let mut heap: BinaryHeap<(DistanceKey, &AffiliationId)> = BinaryHeap::with_capacity(k + 1);
        for (coord, ids) in &self.index {
            let key = DistanceKey::new(*coord, target);
            for id in ids {
                if heap.len() < k {
                    heap.push((key, id));
                } else if let Some(worst) = heap.peek() {
                    if (key, id) < *worst {
                        heap.pop();
                        heap.push((key, id));
                    }
                }
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|(_, id)| id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}
