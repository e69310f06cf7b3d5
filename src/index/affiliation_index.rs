//! Secondary orderings over affiliations
//!
//! The store owns the affiliation records; this index keeps the derived
//! orderings (by name, by distance from the origin, by coordinate) and is
//! updated explicitly by every mutation so it never goes stale.

use super::coord_index::CoordIndex;
use crate::graph::{Affiliation, AffiliationId, Coord, DistanceKey, Name};
use std::collections::BTreeSet;

/// Ordered views over all stored affiliations
#[derive(Debug, Clone, Default)]
pub struct AffiliationIndex {
    /// (name, id): total order by name, ties by id
    by_name: BTreeSet<(Name, AffiliationId)>,

    /// (distance from origin, y, x; id)
    by_distance: BTreeSet<(DistanceKey, AffiliationId)>,

    /// Coordinate lookups
    by_coord: CoordIndex,
}

impl AffiliationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a new affiliation
    pub fn insert(&mut self, affiliation: &Affiliation) {
        let id = affiliation.id.clone();
        self.by_name.insert((affiliation.name.clone(), id.clone()));
        self.by_distance.insert((affiliation.distance_key(), id.clone()));
        self.by_coord.insert(affiliation.coord, id);
    }

    /// Drop an affiliation from every ordering
    pub fn remove(&mut self, affiliation: &Affiliation) {
        let id = &affiliation.id;
        self.by_name.remove(&(affiliation.name.clone(), id.clone()));
        self.by_distance.remove(&(affiliation.distance_key(), id.clone()));
        self.by_coord.remove(&affiliation.coord, id);
    }

    /// Re-index an affiliation that moved from `old` to its current coordinate
    pub fn relocate(&mut self, affiliation: &Affiliation, old: Coord) {
        let id = &affiliation.id;
        self.by_distance.remove(&(DistanceKey::from_origin(old), id.clone()));
        self.by_distance.insert((affiliation.distance_key(), id.clone()));
        self.by_coord.remove(&old, id);
        self.by_coord.insert(affiliation.coord, id.clone());
    }

    /// Ids ordered by name, ties by id
    pub fn alphabetical(&self) -> Vec<AffiliationId> {
        self.by_name.iter().map(|(_, id)| id.clone()).collect()
    }

    /// Ids ordered by distance from the origin, ties by y, then x, then id
    pub fn distance_increasing(&self) -> Vec<AffiliationId> {
        self.by_distance.iter().map(|(_, id)| id.clone()).collect()
    }

    /// Affiliation at exactly `coord`; the smallest id if several share it
    pub fn find_by_coord(&self, coord: &Coord) -> Option<&AffiliationId> {
        self.by_coord.first(coord)
    }

    /// Up to `k` affiliations nearest to `coord`
    pub fn closest_to(&self, coord: &Coord, k: usize) -> Vec<AffiliationId> {
        self.by_coord.nearest(coord, k)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_name.clear();
        self.by_distance.clear();
        self.by_coord.clear();
    }
}
