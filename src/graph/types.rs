//! Core type definitions for the affiliation graph
//!
//! Lookups that miss return the sentinel values defined here instead of
//! failing, so callers can compare against them directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of an affiliation or title of a publication
pub type Name = String;

/// Publication year
pub type Year = u16;

/// Connection weight: number of publications shared by two affiliations
pub type Weight = i32;

/// Distance in arbitrary units
pub type Distance = i32;

/// Returned for names and titles of unknown entities
pub const NO_NAME: &str = "!NO_NAME!";

/// Returned for the year of an unknown publication
pub const NO_YEAR: Year = Year::MAX;

/// Weight of a connection that does not exist
pub const NO_WEIGHT: Weight = -1;

/// Marker for integer values that were not found
pub const NO_VALUE: i32 = i32::MIN;

/// Returned where a distance cannot be computed
pub const NO_DISTANCE: Distance = NO_VALUE;

/// Raw text of the "no affiliation" sentinel
pub const NO_AFFILIATION: &str = "---";

/// Unique identifier for an affiliation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct AffiliationId(String);

impl AffiliationId {
    pub fn new(id: impl Into<String>) -> Self {
        AffiliationId(id.into())
    }

    /// The "no affiliation" sentinel
    pub fn none() -> Self {
        AffiliationId(NO_AFFILIATION.to_string())
    }

    pub fn is_none(&self) -> bool {
        self.0 == NO_AFFILIATION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AffiliationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AffiliationId {
    fn from(s: String) -> Self {
        AffiliationId(s)
    }
}

impl From<&str> for AffiliationId {
    fn from(s: &str) -> Self {
        AffiliationId(s.to_string())
    }
}

/// Unique identifier for a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct PublicationId(pub u64);

impl PublicationId {
    /// The "no publication" sentinel, also used as "no parent"
    pub const NONE: PublicationId = PublicationId(u64::MAX);

    pub fn new(id: u64) -> Self {
        PublicationId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "PublicationId(none)")
        } else {
            write!(f, "PublicationId({})", self.0)
        }
    }
}

impl From<u64> for PublicationId {
    fn from(id: u64) -> Self {
        PublicationId(id)
    }
}
