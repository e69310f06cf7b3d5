//! Affiliation graph data model
//!
//! This module implements:
//! - Affiliations located on an integer grid
//! - Publications forming a citation forest
//! - A weighted co-authorship graph between affiliations
//! - The in-memory store keeping all of them consistent

pub mod affiliation;
pub mod citation;
pub mod connection;
pub mod coord;
pub mod publication;
pub mod store;
pub mod types;

// Re-export main types
pub use affiliation::Affiliation;
pub use connection::{Connection, ConnectionEdge, ConnectionGraph, ConnectionId, Path, PathWithDist};
pub use coord::{Coord, DistanceKey};
pub use publication::Publication;
pub use store::{ScholiaStore, StoreError, StoreResult};
pub use types::{
    AffiliationId, Distance, Name, PublicationId, Weight, Year, NO_AFFILIATION, NO_DISTANCE, NO_NAME,
    NO_VALUE, NO_WEIGHT, NO_YEAR,
};
