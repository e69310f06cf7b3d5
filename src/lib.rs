//! Scholia Affiliation Graph Store
//!
//! An in-memory store of research affiliations placed on a 2D grid, the
//! publications they authored, the citation forest between publications and
//! the weighted co-authorship graph between affiliations.
//!
//! # Components
//!
//! - Affiliation index: lookups by id and coordinate, orderings by name and
//!   by distance from the origin, nearest-neighbor queries
//! - Publication store: publications with their affiliations and a
//!   single-parent citation forest (ancestor chains, descendants, closest
//!   common parent)
//! - Connection graph: one canonical weighted edge per pair of affiliations
//!   that share publications
//! - Path engine: any path, fewest hops, least friction (minimax) and
//!   weighted shortest path over the connection graph
//!
//! Lookups that miss return sentinel values (`NO_NAME`, `Coord::NONE`,
//! `PublicationId::NONE`, ...). Every mutator has a `try_*` form returning a
//! [`StoreError`] and a plain form returning `bool`.
//!
//! ## Example Usage
//!
//! ```rust
//! use scholia::graph::{AffiliationId, Coord, PublicationId, ScholiaStore};
//!
//! let mut store = ScholiaStore::new();
//! store.add_affiliation("tuni", "Tampere University", Coord::new(10, 20));
//! store.add_affiliation("aalto", "Aalto University", Coord::new(3, 4));
//!
//! let tuni = AffiliationId::new("tuni");
//! let aalto = AffiliationId::new("aalto");
//! store.add_publication(PublicationId::new(1), "Graphs", 2021, vec![tuni.clone(), aalto.clone()]);
//!
//! assert_eq!(store.get_affiliations_distance_increasing(), vec![aalto.clone(), tuni.clone()]);
//! assert_eq!(store.get_connected_affiliations(&tuni)[0].weight, 1);
//! assert_eq!(store.get_any_path(&tuni, &aalto).len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod index;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, StoreConfig};
pub use graph::{
    Affiliation, AffiliationId, Connection, Coord, Distance, Name, Path, PathWithDist, Publication,
    PublicationId, ScholiaStore, StoreError, StoreResult, Weight, Year,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
