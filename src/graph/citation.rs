//! Publications and the citation forest
//!
//! Each publication has at most one parent (the publication that references
//! it) and any number of children. Chains are walked with a visited set so
//! that a cycle admitted with `reject_reference_cycles: false` still
//! terminates.

use super::publication::Publication;
use super::store::{ScholiaStore, StoreError, StoreResult};
use super::types::{AffiliationId, Name, PublicationId, Year, NO_NAME, NO_YEAR};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, warn};

impl ScholiaStore {
    pub fn get_publication_count(&self) -> usize {
        self.publications.len()
    }

    /// All publication ids in insertion order
    pub fn all_publications(&self) -> Vec<PublicationId> {
        self.publications.keys().copied().collect()
    }

    /// Get a publication by ID
    pub fn publication(&self, id: PublicationId) -> Option<&Publication> {
        self.publications.get(&id)
    }

    pub fn has_publication(&self, id: PublicationId) -> bool {
        self.publications.contains_key(&id)
    }

    /// Add a new root publication authored by `affiliations`.
    ///
    /// Duplicate affiliation ids are collapsed. Ids of affiliations that are
    /// not (yet) in the store are recorded as given. Neither `id` nor any
    /// affiliation may be a sentinel.
    pub fn try_add_publication<I>(
        &mut self,
        id: PublicationId,
        title: impl Into<Name>,
        year: Year,
        affiliations: I,
    ) -> StoreResult<()>
    where
        I: IntoIterator<Item = AffiliationId>,
    {
        if id.is_none() {
            return Err(StoreError::ReservedId(id.to_string()));
        }
        if self.publications.contains_key(&id) {
            return Err(StoreError::PublicationAlreadyExists(id));
        }

        let affiliations: Vec<AffiliationId> = affiliations.into_iter().collect();
        if let Some(reserved) = affiliations.iter().find(|a| a.is_none()) {
            return Err(StoreError::ReservedId(reserved.to_string()));
        }

        let publication = Publication::new(id, title, year, affiliations);
        let members: Vec<AffiliationId> = publication.affiliations.iter().cloned().collect();

        for affiliation in &members {
            self.affiliation_publications
                .entry(affiliation.clone())
                .or_default()
                .insert(id);
        }
        self.connections.link_all(&members);
        self.publications.insert(id, publication);

        debug!("Added {} with {} affiliations", id, members.len());
        Ok(())
    }

    /// Add a new root publication; false if the id is taken or reserved
    pub fn add_publication<I>(
        &mut self,
        id: PublicationId,
        title: impl Into<Name>,
        year: Year,
        affiliations: I,
    ) -> bool
    where
        I: IntoIterator<Item = AffiliationId>,
    {
        self.try_add_publication(id, title, year, affiliations).is_ok()
    }

    /// Title of a publication, [`NO_NAME`] if unknown
    pub fn get_publication_name(&self, id: PublicationId) -> Name {
        self.publications
            .get(&id)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| NO_NAME.to_string())
    }

    /// Year of a publication, [`NO_YEAR`] if unknown
    pub fn get_publication_year(&self, id: PublicationId) -> Year {
        self.publications.get(&id).map(|p| p.year).unwrap_or(NO_YEAR)
    }

    /// Contributing affiliations in order of association.
    ///
    /// An unknown publication yields `[AffiliationId::none()]`.
    pub fn get_affiliations(&self, id: PublicationId) -> Vec<AffiliationId> {
        match self.publications.get(&id) {
            Some(publication) => publication.affiliations.iter().cloned().collect(),
            None => vec![AffiliationId::none()],
        }
    }

    /// Make `parent` the publication that references `id`.
    ///
    /// An existing parent of `id` is replaced and loses `id` as a child.
    pub fn try_add_reference(&mut self, id: PublicationId, parent: PublicationId) -> StoreResult<()> {
        if !self.publications.contains_key(&id) {
            return Err(StoreError::PublicationNotFound(id));
        }
        if !self.publications.contains_key(&parent) {
            return Err(StoreError::PublicationNotFound(parent));
        }

        if self.config.reject_reference_cycles && (id == parent || self.is_ancestor(id, parent)) {
            warn!("Rejected reference {} -> {}: would form a cycle", parent, id);
            return Err(StoreError::ReferenceCycle { id, parent });
        }

        let old_parent = self.publications.get(&id).and_then(|p| p.parent);
        if old_parent == Some(parent) {
            return Ok(());
        }
        if let Some(old) = old_parent {
            if let Some(old) = self.publications.get_mut(&old) {
                old.remove_child(id);
            }
        }
        if let Some(child) = self.publications.get_mut(&id) {
            child.parent = Some(parent);
        }
        if let Some(parent_pub) = self.publications.get_mut(&parent) {
            parent_pub.add_child(id);
        }

        debug!("Linked {} as referenced by {}", id, parent);
        Ok(())
    }

    /// Make `parent` the publication that references `id`; false if either
    /// is unknown or the link is rejected
    pub fn add_reference(&mut self, id: PublicationId, parent: PublicationId) -> bool {
        self.try_add_reference(id, parent).is_ok()
    }

    /// True if `ancestor` is on the parent chain of `id`
    fn is_ancestor(&self, ancestor: PublicationId, id: PublicationId) -> bool {
        self.parent_chain(id).contains(&ancestor)
    }

    /// Parents of `id` from nearest to farthest
    fn parent_chain(&self, id: PublicationId) -> Vec<PublicationId> {
        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(id);

        let mut current = self.publications.get(&id).and_then(|p| p.parent);
        while let Some(parent) = current {
            if !visited.insert(parent) {
                break;
            }
            chain.push(parent);
            current = self.publications.get(&parent).and_then(|p| p.parent);
        }
        chain
    }

    /// Direct children of a publication; empty if it is unknown
    pub fn get_direct_references(&self, id: PublicationId) -> Vec<PublicationId> {
        self.publications
            .get(&id)
            .map(|p| p.children.clone())
            .unwrap_or_default()
    }

    /// Associate an existing affiliation with an existing publication
    pub fn try_add_affiliation_to_publication(
        &mut self,
        affiliation: &AffiliationId,
        id: PublicationId,
    ) -> StoreResult<()> {
        if !self.affiliations.contains_key(affiliation) {
            return Err(StoreError::AffiliationNotFound(affiliation.clone()));
        }
        let publication = self
            .publications
            .get_mut(&id)
            .ok_or(StoreError::PublicationNotFound(id))?;
        if publication.has_affiliation(affiliation) {
            return Err(StoreError::AlreadyLinked {
                affiliation: affiliation.clone(),
                publication: id,
            });
        }

        let members: Vec<AffiliationId> = publication.affiliations.iter().cloned().collect();
        publication.affiliations.insert(affiliation.clone());
        self.affiliation_publications
            .entry(affiliation.clone())
            .or_default()
            .insert(id);
        self.connections.link_one(affiliation, &members);

        debug!("Associated affiliation {} with {}", affiliation, id);
        Ok(())
    }

    /// Associate an affiliation with a publication; false if either is
    /// unknown or they are already associated
    pub fn add_affiliation_to_publication(&mut self, affiliation: &AffiliationId, id: PublicationId) -> bool {
        self.try_add_affiliation_to_publication(affiliation, id).is_ok()
    }

    /// Publications an affiliation contributed to, in order of association.
    ///
    /// An unknown affiliation yields `[PublicationId::NONE]`.
    pub fn get_publications(&self, affiliation: &AffiliationId) -> Vec<PublicationId> {
        match self.affiliation_publications.get(affiliation) {
            Some(publications) => publications.iter().copied().collect(),
            None => vec![PublicationId::NONE],
        }
    }

    /// Parent of a publication, [`PublicationId::NONE`] for roots and unknown ids
    pub fn get_parent(&self, id: PublicationId) -> PublicationId {
        self.publications
            .get(&id)
            .map(Publication::parent_or_none)
            .unwrap_or(PublicationId::NONE)
    }

    /// `(year, id)` of the affiliation's publications from `year` onwards.
    ///
    /// An unknown affiliation yields `[(NO_YEAR, PublicationId::NONE)]`.
    pub fn get_publications_after(&self, affiliation: &AffiliationId, year: Year) -> Vec<(Year, PublicationId)> {
        let Some(publications) = self.affiliation_publications.get(affiliation) else {
            return vec![(NO_YEAR, PublicationId::NONE)];
        };

        let mut result: Vec<(Year, PublicationId)> = publications
            .iter()
            .filter_map(|id| self.publications.get(id))
            .filter(|p| p.year >= year)
            .map(|p| (p.year, p.id))
            .collect();
        result.sort_unstable();
        result
    }

    /// Parent chain of a publication from nearest to farthest.
    ///
    /// An unknown publication yields `[PublicationId::NONE]`.
    pub fn get_referenced_by_chain(&self, id: PublicationId) -> Vec<PublicationId> {
        if !self.publications.contains_key(&id) {
            return vec![PublicationId::NONE];
        }
        self.parent_chain(id)
    }

    /// Every publication below `id` in the forest, breadth first.
    ///
    /// An unknown publication yields `[PublicationId::NONE]`.
    pub fn get_all_references(&self, id: PublicationId) -> Vec<PublicationId> {
        let Some(root) = self.publications.get(&id) else {
            return vec![PublicationId::NONE];
        };

        let mut result = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(id);
        let mut queue: VecDeque<PublicationId> = root.children.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);
            if let Some(publication) = self.publications.get(&current) {
                queue.extend(publication.children.iter().copied());
            }
        }
        result
    }

    /// Nearest publication that references both `id1` and `id2` through
    /// their parent chains; [`PublicationId::NONE`] if there is none.
    ///
    /// A publication is not its own common parent.
    pub fn get_closest_common_parent(&self, id1: PublicationId, id2: PublicationId) -> PublicationId {
        if !self.publications.contains_key(&id1) || !self.publications.contains_key(&id2) {
            return PublicationId::NONE;
        }

        let second: FxHashSet<PublicationId> = self.parent_chain(id2).into_iter().collect();
        self.parent_chain(id1)
            .into_iter()
            .find(|parent| second.contains(parent))
            .unwrap_or(PublicationId::NONE)
    }

    /// Remove a publication.
    ///
    /// Its children become roots, it is detached from its parent and from
    /// every affiliation, and co-authorship weights it contributed are
    /// decremented when `recompute_weights_on_removal` is set.
    pub fn try_remove_publication(&mut self, id: PublicationId) -> StoreResult<Publication> {
        let publication = self
            .publications
            .shift_remove(&id)
            .ok_or(StoreError::PublicationNotFound(id))?;

        if let Some(parent) = publication.parent {
            if let Some(parent) = self.publications.get_mut(&parent) {
                parent.remove_child(id);
            }
        }
        for child in &publication.children {
            if let Some(child) = self.publications.get_mut(child) {
                if child.parent == Some(id) {
                    child.parent = None;
                }
            }
        }

        for affiliation in &publication.affiliations {
            if let Some(publications) = self.affiliation_publications.get_mut(affiliation) {
                publications.shift_remove(&id);
            }
        }

        if self.config.recompute_weights_on_removal {
            let members: Vec<AffiliationId> = publication.affiliations.iter().cloned().collect();
            self.connections.unlink_all(&members);
        }

        debug!(
            "Removed {} ({} children orphaned, {} affiliations detached)",
            id,
            publication.children.len(),
            publication.affiliations.len()
        );
        Ok(publication)
    }

    /// Remove a publication; false if it is unknown
    pub fn remove_publication(&mut self, id: PublicationId) -> bool {
        self.try_remove_publication(id).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::graph::*;

    fn p(id: u64) -> PublicationId {
        PublicationId::new(id)
    }

    fn aff(id: &str) -> AffiliationId {
        AffiliationId::new(id)
    }

    fn store_with_publications(ids: &[u64]) -> ScholiaStore {
        let mut store = ScholiaStore::new();
        for &id in ids {
            store.add_publication(p(id), format!("Paper {}", id), 2000 + id as u16, Vec::new());
        }
        store
    }

    #[test]
    fn test_add_publication_and_queries() {
        let mut store = ScholiaStore::new();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        assert!(store.add_publication(p(1), "Graphs", 2020, vec![aff("a")]));
        assert!(!store.add_publication(p(1), "Other", 2021, vec![aff("a")]));

        assert_eq!(store.get_publication_count(), 1);
        assert_eq!(store.get_publication_name(p(1)), "Graphs");
        assert_eq!(store.get_publication_year(p(1)), 2020);
        assert_eq!(store.get_affiliations(p(1)), vec![aff("a")]);
        assert_eq!(store.get_publications(&aff("a")), vec![p(1)]);
        assert_eq!(store.get_parent(p(1)), PublicationId::NONE);
    }

    #[test]
    fn test_unknown_publication_sentinels() {
        let store = ScholiaStore::new();
        assert_eq!(store.get_publication_name(p(9)), NO_NAME);
        assert_eq!(store.get_publication_year(p(9)), NO_YEAR);
        assert_eq!(store.get_affiliations(p(9)), vec![AffiliationId::none()]);
        assert!(store.get_direct_references(p(9)).is_empty());
        assert_eq!(store.get_referenced_by_chain(p(9)), vec![PublicationId::NONE]);
        assert_eq!(store.get_all_references(p(9)), vec![PublicationId::NONE]);
        assert_eq!(store.get_publications(&aff("x")), vec![PublicationId::NONE]);
        assert_eq!(
            store.get_publications_after(&aff("x"), 2000),
            vec![(NO_YEAR, PublicationId::NONE)]
        );
        assert_eq!(store.get_closest_common_parent(p(1), p(2)), PublicationId::NONE);
    }

    #[test]
    fn test_reference_chain() {
        let mut store = store_with_publications(&[1, 2, 3, 4]);
        assert!(store.add_reference(p(2), p(1)));
        assert!(store.add_reference(p(3), p(2)));
        assert!(store.add_reference(p(4), p(2)));

        assert_eq!(store.get_parent(p(3)), p(2));
        assert_eq!(store.get_direct_references(p(2)), vec![p(3), p(4)]);
        assert_eq!(store.get_referenced_by_chain(p(3)), vec![p(2), p(1)]);
        assert!(store.get_referenced_by_chain(p(1)).is_empty());
        assert_eq!(store.get_all_references(p(1)), vec![p(2), p(3), p(4)]);
        assert!(store.get_all_references(p(4)).is_empty());
    }

    #[test]
    fn test_reference_to_unknown_fails() {
        let mut store = store_with_publications(&[1]);
        assert!(!store.add_reference(p(1), p(2)));
        assert_eq!(
            store.try_add_reference(p(3), p(1)),
            Err(StoreError::PublicationNotFound(p(3)))
        );
        assert_eq!(store.get_parent(p(1)), PublicationId::NONE);
    }

    #[test]
    fn test_reparenting_moves_child() {
        let mut store = store_with_publications(&[1, 2, 3]);
        store.add_reference(p(3), p(1));
        store.add_reference(p(3), p(2));

        assert_eq!(store.get_parent(p(3)), p(2));
        assert!(store.get_direct_references(p(1)).is_empty());
        assert_eq!(store.get_direct_references(p(2)), vec![p(3)]);
    }

    #[test]
    fn test_cycles_rejected_by_default() {
        let mut store = store_with_publications(&[1, 2, 3]);
        store.add_reference(p(2), p(1));
        store.add_reference(p(3), p(2));

        assert_eq!(
            store.try_add_reference(p(1), p(3)),
            Err(StoreError::ReferenceCycle { id: p(1), parent: p(3) })
        );
        assert!(!store.add_reference(p(1), p(1)));
        assert_eq!(store.get_parent(p(1)), PublicationId::NONE);
    }

    #[test]
    fn test_cycle_traversals_terminate_when_allowed() {
        let mut store = ScholiaStore::with_config(StoreConfig::legacy()).unwrap();
        for id in 1..=3 {
            store.add_publication(p(id), "P", 2000, Vec::new());
        }
        assert!(store.add_reference(p(2), p(1)));
        assert!(store.add_reference(p(3), p(2)));
        assert!(store.add_reference(p(1), p(3)));

        assert_eq!(store.get_referenced_by_chain(p(1)), vec![p(3), p(2)]);
        assert_eq!(store.get_all_references(p(1)), vec![p(2), p(3)]);
    }

    #[test]
    fn test_closest_common_parent() {
        let mut store = store_with_publications(&[1, 2, 3, 4, 5, 6]);
        store.add_reference(p(2), p(1));
        store.add_reference(p(3), p(2));
        store.add_reference(p(4), p(2));
        store.add_reference(p(5), p(1));

        assert_eq!(store.get_closest_common_parent(p(3), p(4)), p(2));
        assert_eq!(store.get_closest_common_parent(p(3), p(5)), p(1));
        assert_eq!(store.get_closest_common_parent(p(3), p(2)), p(1));
        assert_eq!(store.get_closest_common_parent(p(3), p(6)), PublicationId::NONE);
        assert_eq!(store.get_closest_common_parent(p(1), p(2)), PublicationId::NONE);
    }

    #[test]
    fn test_add_affiliation_to_publication() {
        let mut store = ScholiaStore::new();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        store.add_affiliation("b", "B", Coord::new(1, 0));
        store.add_publication(p(1), "P", 2000, vec![aff("a")]);

        assert!(store.add_affiliation_to_publication(&aff("b"), p(1)));
        assert!(!store.add_affiliation_to_publication(&aff("b"), p(1)));
        assert!(!store.add_affiliation_to_publication(&aff("ghost"), p(1)));
        assert!(!store.add_affiliation_to_publication(&aff("a"), p(2)));

        assert_eq!(store.get_affiliations(p(1)), vec![aff("a"), aff("b")]);
        assert_eq!(store.get_publications(&aff("b")), vec![p(1)]);
        assert_eq!(store.connections().weight(&aff("a"), &aff("b")), 1);
    }

    #[test]
    fn test_publications_after_sorted_by_year() {
        let mut store = ScholiaStore::new();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        store.add_publication(p(3), "C", 2015, vec![aff("a")]);
        store.add_publication(p(1), "A", 2010, vec![aff("a")]);
        store.add_publication(p(2), "B", 2015, vec![aff("a")]);
        store.add_publication(p(4), "D", 2001, vec![aff("a")]);

        assert_eq!(
            store.get_publications_after(&aff("a"), 2010),
            vec![(2010, p(1)), (2015, p(2)), (2015, p(3))]
        );
        assert!(store.get_publications_after(&aff("a"), 2020).is_empty());
    }

    #[test]
    fn test_remove_publication_orphans_children() {
        let mut store = store_with_publications(&[1, 2, 3, 4]);
        store.add_reference(p(2), p(1));
        store.add_reference(p(3), p(2));
        store.add_reference(p(4), p(2));

        assert!(store.remove_publication(p(2)));
        assert!(!store.remove_publication(p(2)));

        assert_eq!(store.get_parent(p(3)), PublicationId::NONE);
        assert_eq!(store.get_parent(p(4)), PublicationId::NONE);
        assert!(store.get_direct_references(p(1)).is_empty());
        assert_eq!(store.get_publication_count(), 3);
    }

    #[test]
    fn test_remove_publication_updates_weights() {
        let mut store = ScholiaStore::new();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        store.add_affiliation("b", "B", Coord::new(1, 0));
        store.add_publication(p(1), "P1", 2000, vec![aff("a"), aff("b")]);
        store.add_publication(p(2), "P2", 2001, vec![aff("a"), aff("b")]);
        assert_eq!(store.connections().weight(&aff("a"), &aff("b")), 2);

        store.remove_publication(p(1));
        assert_eq!(store.connections().weight(&aff("a"), &aff("b")), 1);
        assert_eq!(store.get_publications(&aff("a")), vec![p(2)]);

        store.remove_publication(p(2));
        assert_eq!(store.connections().weight(&aff("a"), &aff("b")), NO_WEIGHT);
        assert!(store.get_connected_affiliations(&aff("a")).is_empty());
    }

    #[test]
    fn test_legacy_removal_keeps_weights() {
        let mut store = ScholiaStore::with_config(StoreConfig::legacy()).unwrap();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        store.add_affiliation("b", "B", Coord::new(1, 0));
        store.add_publication(p(1), "P1", 2000, vec![aff("a"), aff("b")]);

        store.remove_publication(p(1));
        assert_eq!(store.connections().weight(&aff("a"), &aff("b")), 1);
    }

    #[test]
    fn test_remove_affiliation_detaches_from_publications() {
        let mut store = ScholiaStore::new();
        store.add_affiliation("a", "A", Coord::new(0, 0));
        store.add_affiliation("b", "B", Coord::new(1, 0));
        store.add_publication(p(1), "P1", 2000, vec![aff("a"), aff("b")]);

        assert!(store.remove_affiliation(&aff("a")));
        assert_eq!(store.get_affiliations(p(1)), vec![aff("b")]);
        assert_eq!(store.get_publications(&aff("a")), vec![PublicationId::NONE]);
        assert!(store.get_connected_affiliations(&aff("b")).is_empty());
        assert!(store.get_all_connections().is_empty());
    }

    #[test]
    fn test_sentinel_publication_ids_are_reserved() {
        let mut store = store_with_publications(&[1]);

        assert_eq!(
            store.try_add_publication(PublicationId::NONE, "Nothing", 2000, vec![aff("a")]),
            Err(StoreError::ReservedId(PublicationId::NONE.to_string()))
        );
        assert!(!store.add_publication(PublicationId::NONE, "Nothing", 2000, Vec::new()));
        assert!(!store.has_publication(PublicationId::NONE));
        assert_eq!(store.get_publication_name(PublicationId::NONE), NO_NAME);

        assert!(!store.add_reference(p(1), PublicationId::NONE));
        assert!(!store.add_reference(PublicationId::NONE, p(1)));
        assert_eq!(store.get_parent(p(1)), PublicationId::NONE);
        assert!(store.get_direct_references(PublicationId::NONE).is_empty());
        assert_eq!(store.get_publication_count(), 1);
    }

    #[test]
    fn test_sentinel_affiliation_in_publication_is_rejected() {
        let mut store = ScholiaStore::new();
        assert_eq!(
            store.try_add_publication(p(1), "P", 2000, vec![aff("a"), AffiliationId::none()]),
            Err(StoreError::ReservedId(NO_AFFILIATION.to_string()))
        );

        assert!(!store.has_publication(p(1)));
        assert_eq!(store.get_publications(&aff("a")), vec![PublicationId::NONE]);
        assert!(store.get_connected_affiliations(&AffiliationId::none()).is_empty());
        assert!(store.get_all_connections().is_empty());
    }

    #[test]
    fn test_publication_with_unknown_affiliation() {
        let mut store = ScholiaStore::new();
        store.add_publication(p(1), "P", 2000, vec![aff("later")]);
        assert_eq!(store.get_publications(&aff("later")), vec![p(1)]);

        store.add_affiliation("later", "Later", Coord::new(2, 2));
        assert_eq!(store.get_publications(&aff("later")), vec![p(1)]);
    }
}
