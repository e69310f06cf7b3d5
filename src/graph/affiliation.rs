//! Affiliation records
//!
//! An affiliation is an organization with a display name and an integer
//! location. Its distance from the origin is cached alongside the location
//! and must be refreshed through [`Affiliation::relocate`].

use super::coord::{Coord, DistanceKey};
use super::types::{AffiliationId, Name};
use serde::Serialize;

/// An affiliation stored in the graph
///
/// Serialize-only: records are built through [`Affiliation::new`] so the
/// cached distance always matches `coord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Affiliation {
    /// Unique identifier for this affiliation
    pub id: AffiliationId,

    /// Display name, not required to be unique
    pub name: Name,

    /// Location on the plane
    pub coord: Coord,

    /// Euclidean distance of `coord` from the origin
    distance: f64,
}

impl Affiliation {
    /// Create a new affiliation
    pub fn new(id: AffiliationId, name: impl Into<Name>, coord: Coord) -> Self {
        Affiliation {
            id,
            name: name.into(),
            coord,
            distance: coord.distance_from_origin(),
        }
    }

    /// Distance from the origin (cached)
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Key used by the distance-ordered index
    pub fn distance_key(&self) -> DistanceKey {
        DistanceKey::from_origin(self.coord)
    }

    /// Move to `coord`, refreshing the cached distance. Returns the old coordinate.
    pub fn relocate(&mut self, coord: Coord) -> Coord {
        let old = std::mem::replace(&mut self.coord, coord);
        self.distance = coord.distance_from_origin();
        old
    }
}
