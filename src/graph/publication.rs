//! Publication records
//!
//! A publication lists the affiliations that authored it and takes part in
//! the citation forest through a single optional parent and a list of
//! direct children. Forest links are publication ids resolved through the
//! store, never references into it.

use super::types::{AffiliationId, Name, PublicationId, Year};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A publication in the citation forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Unique identifier, immutable once assigned
    pub id: PublicationId,

    /// Title
    pub title: Name,

    /// Publication year
    pub year: Year,

    /// Contributing affiliations (unique, in order of association)
    pub affiliations: IndexSet<AffiliationId>,

    /// Publication this one is referenced by, if any
    pub parent: Option<PublicationId>,

    /// Publications that have this one as parent
    pub children: Vec<PublicationId>,
}

impl Publication {
    /// Create a new root publication
    pub fn new<I>(id: PublicationId, title: impl Into<Name>, year: Year, affiliations: I) -> Self
    where
        I: IntoIterator<Item = AffiliationId>,
    {
        Publication {
            id,
            title: title.into(),
            year,
            affiliations: affiliations.into_iter().collect(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Check if an affiliation contributed to this publication
    pub fn has_affiliation(&self, id: &AffiliationId) -> bool {
        self.affiliations.contains(id)
    }

    /// Parent id or [`PublicationId::NONE`]
    pub fn parent_or_none(&self) -> PublicationId {
        self.parent.unwrap_or(PublicationId::NONE)
    }

    /// Register a direct child, ignoring duplicates
    pub(crate) fn add_child(&mut self, child: PublicationId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Unregister a direct child
    pub(crate) fn remove_child(&mut self, child: PublicationId) {
        self.children.retain(|&id| id != child);
    }
}
