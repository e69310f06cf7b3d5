//! In-memory affiliation graph storage
//!
//! One primary map per entity owns the records; derived structures (the
//! affiliation orderings, the affiliation -> publication reverse index and
//! the connection graph) are updated by every mutation before it returns.
//!
//! Mutations come in two forms: `try_*` methods returning [`StoreResult`],
//! and the plain forms returning `bool`. Queries never fail; a lookup that
//! misses returns the sentinel documented on the method.

use super::affiliation::Affiliation;
use super::connection::{Connection, ConnectionGraph};
use super::coord::Coord;
use super::publication::Publication;
use super::types::{AffiliationId, Name, PublicationId, NO_NAME};
use crate::config::{ConfigResult, StoreConfig};
use crate::index::AffiliationIndex;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during store mutations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Affiliation {0} not found")]
    AffiliationNotFound(AffiliationId),

    #[error("Affiliation {0} already exists")]
    AffiliationAlreadyExists(AffiliationId),

    #[error("{0} not found")]
    PublicationNotFound(PublicationId),

    #[error("{0} already exists")]
    PublicationAlreadyExists(PublicationId),

    #[error("Affiliation {affiliation} is already linked to {publication}")]
    AlreadyLinked {
        affiliation: AffiliationId,
        publication: PublicationId,
    },

    /// The id is the "not found" sentinel of its type
    #[error("{0} is reserved and cannot be stored")]
    ReservedId(String),

    #[error("Referencing {id} from {parent} would make it its own ancestor")]
    ReferenceCycle {
        id: PublicationId,
        parent: PublicationId,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// In-memory store of affiliations, publications and their connections
///
/// - affiliations: AffiliationId -> Affiliation (insertion ordered)
/// - affiliation_index: orderings by name, distance and coordinate
/// - publications: PublicationId -> Publication (insertion ordered)
/// - affiliation_publications: AffiliationId -> publications it contributed to
/// - connections: co-authorship graph
#[derive(Debug, Default)]
pub struct ScholiaStore {
    pub(super) config: StoreConfig,

    pub(super) affiliations: FxIndexMap<AffiliationId, Affiliation>,

    pub(super) affiliation_index: AffiliationIndex,

    pub(super) publications: FxIndexMap<PublicationId, Publication>,

    /// Reverse index; may hold ids of affiliations that were never added
    pub(super) affiliation_publications: FxHashMap<AffiliationId, FxIndexSet<PublicationId>>,

    pub(super) connections: ConnectionGraph,
}

impl ScholiaStore {
    /// Create a new empty store with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty store; fails if `config` does not validate
    pub fn with_config(config: StoreConfig) -> ConfigResult<Self> {
        config.validate()?;
        info!(
            "Creating store (closest_limit: {}, reject_reference_cycles: {}, recompute_weights_on_removal: {})",
            config.closest_limit, config.reject_reference_cycles, config.recompute_weights_on_removal
        );
        Ok(ScholiaStore {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Remove every affiliation, publication and connection
    pub fn clear_all(&mut self) {
        info!(
            "Clearing store ({} affiliations, {} publications, {} connections)",
            self.affiliations.len(),
            self.publications.len(),
            self.connections.edge_count()
        );
        self.affiliations.clear();
        self.affiliation_index.clear();
        self.publications.clear();
        self.affiliation_publications.clear();
        self.connections.clear();
    }

    // ============================================================
    // Affiliations
    // ============================================================

    pub fn get_affiliation_count(&self) -> usize {
        self.affiliations.len()
    }

    /// All affiliation ids in insertion order
    pub fn get_all_affiliations(&self) -> Vec<AffiliationId> {
        self.affiliations.keys().cloned().collect()
    }

    /// Get an affiliation by ID
    pub fn affiliation(&self, id: &AffiliationId) -> Option<&Affiliation> {
        self.affiliations.get(id)
    }

    pub fn has_affiliation(&self, id: &AffiliationId) -> bool {
        self.affiliations.contains_key(id)
    }

    /// Add a new affiliation
    pub fn try_add_affiliation(
        &mut self,
        id: impl Into<AffiliationId>,
        name: impl Into<Name>,
        coord: Coord,
    ) -> StoreResult<()> {
        let id = id.into();
        if id.is_none() {
            return Err(StoreError::ReservedId(id.to_string()));
        }
        if self.affiliations.contains_key(&id) {
            return Err(StoreError::AffiliationAlreadyExists(id));
        }

        let affiliation = Affiliation::new(id.clone(), name, coord);
        self.affiliation_index.insert(&affiliation);
        self.affiliations.insert(id.clone(), affiliation);

        // Keep publications that already named this id
        self.affiliation_publications.entry(id.clone()).or_default();
        self.connections.ensure_node(&id);

        debug!("Added affiliation {} at {}", id, coord);
        Ok(())
    }

    /// Add a new affiliation; false if the id is taken or reserved
    pub fn add_affiliation(
        &mut self,
        id: impl Into<AffiliationId>,
        name: impl Into<Name>,
        coord: Coord,
    ) -> bool {
        self.try_add_affiliation(id, name, coord).is_ok()
    }

    /// Name of an affiliation, [`NO_NAME`] if unknown
    pub fn get_affiliation_name(&self, id: &AffiliationId) -> Name {
        self.affiliations
            .get(id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| NO_NAME.to_string())
    }

    /// Location of an affiliation, [`Coord::NONE`] if unknown
    pub fn get_affiliation_coord(&self, id: &AffiliationId) -> Coord {
        self.affiliations
            .get(id)
            .map(|a| a.coord)
            .unwrap_or(Coord::NONE)
    }

    /// Affiliation located exactly at `coord`, [`AffiliationId::none`] if none is.
    ///
    /// If several affiliations share the coordinate the smallest id is returned.
    pub fn find_affiliation_with_coord(&self, coord: Coord) -> AffiliationId {
        self.affiliation_index
            .find_by_coord(&coord)
            .cloned()
            .unwrap_or_else(AffiliationId::none)
    }

    /// Move an affiliation, re-indexing its distance and coordinate
    pub fn try_change_affiliation_coord(&mut self, id: &AffiliationId, coord: Coord) -> StoreResult<()> {
        let affiliation = self
            .affiliations
            .get_mut(id)
            .ok_or_else(|| StoreError::AffiliationNotFound(id.clone()))?;

        let old = affiliation.relocate(coord);
        self.affiliation_index.relocate(affiliation, old);

        debug!("Moved affiliation {} from {} to {}", id, old, coord);
        Ok(())
    }

    /// Move an affiliation; false if it is unknown
    pub fn change_affiliation_coord(&mut self, id: &AffiliationId, coord: Coord) -> bool {
        self.try_change_affiliation_coord(id, coord).is_ok()
    }

    /// All affiliation ids by name, ties by id
    pub fn get_affiliations_alphabetically(&self) -> Vec<AffiliationId> {
        self.affiliation_index.alphabetical()
    }

    /// All affiliation ids by distance from the origin, ties by y, then x, then id
    pub fn get_affiliations_distance_increasing(&self) -> Vec<AffiliationId> {
        self.affiliation_index.distance_increasing()
    }

    /// The `closest_limit` affiliations nearest to `coord`, nearest first
    pub fn get_affiliations_closest_to(&self, coord: Coord) -> Vec<AffiliationId> {
        self.affiliation_index
            .closest_to(&coord, self.config.closest_limit)
    }

    /// Remove an affiliation from every publication, index and connection
    pub fn try_remove_affiliation(&mut self, id: &AffiliationId) -> StoreResult<Affiliation> {
        let affiliation = self
            .affiliations
            .shift_remove(id)
            .ok_or_else(|| StoreError::AffiliationNotFound(id.clone()))?;
        self.affiliation_index.remove(&affiliation);

        let publications = self.affiliation_publications.remove(id).unwrap_or_default();
        for publication_id in &publications {
            if let Some(publication) = self.publications.get_mut(publication_id) {
                publication.affiliations.shift_remove(id);
            }
        }

        let dropped = self.connections.remove_node(id);

        debug!(
            "Removed affiliation {} ({} publications, {} connections)",
            id,
            publications.len(),
            dropped
        );
        Ok(affiliation)
    }

    /// Remove an affiliation; false if it is unknown
    pub fn remove_affiliation(&mut self, id: &AffiliationId) -> bool {
        self.try_remove_affiliation(id).is_ok()
    }

    // ============================================================
    // Connections
    // ============================================================

    /// Co-authorship graph, read-only
    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    /// Connections incident to `id`, each oriented from `id`
    pub fn get_connected_affiliations(&self, id: &AffiliationId) -> Vec<Connection> {
        self.connections.connections_of(id)
    }

    /// Every connection once per direction
    pub fn get_all_connections(&self) -> Vec<Connection> {
        self.connections.all_directed()
    }

    /// Every connection once, oriented from the smaller id
    pub fn get_unique_connections(&self) -> Vec<Connection> {
        self.connections.all_undirected()
    }
}
