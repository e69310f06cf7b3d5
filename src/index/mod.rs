//! Affiliation indexing module
//!
//! Provides B-Tree orderings by name and by distance, and a coordinate
//! index for exact and nearest-neighbor lookups.

pub mod affiliation_index;
pub mod coord_index;

pub use affiliation_index::AffiliationIndex;
pub use coord_index::CoordIndex;
