//! Selection - Option and Versioned Reference Types
//!
//! Every dropdown in the application works over id/label pairs. Ids for
//! tests, cohorts, and visits are composite `entityId@versionNumber` keys
//! so that a selection pins a specific version of the referenced entity.

use serde::{Deserialize, Serialize};

/// A single selectable id/label pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    /// Unique id within a catalog snapshot (often `entityId@version`)
    pub id: String,
    /// Display label
    pub text: String,
    /// Whether the option is currently selected
    #[serde(default)]
    pub selected: bool,
}

impl SelectionOption {
    /// Create a new unselected option
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            selected: false,
        }
    }
}

/// A parsed `entityId@versionNumber` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedId {
    /// The referenced entity id
    pub id: String,
    /// The pinned version number
    pub version: u32,
}

impl VersionedId {
    /// Build the composite key for an id/version pair
    pub fn key(id: &str, version: u32) -> String {
        format!("{id}@{version}")
    }

    /// Parse a composite `id@version` key.
    ///
    /// Returns `None` when the separator or version number is missing or
    /// malformed; a bare id without a version is not accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, version) = raw.rsplit_once('@')?;
        if id.is_empty() {
            return None;
        }
        let version = version.parse().ok()?;
        Some(Self {
            id: id.to_string(),
            version,
        })
    }
}

impl std::fmt::Display for VersionedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_id_round_trip() {
        let parsed = VersionedId::parse("T1@2").expect("parse");
        assert_eq!(parsed.id, "T1");
        assert_eq!(parsed.version, 2);
        assert_eq!(parsed.to_string(), "T1@2");
        assert_eq!(VersionedId::key("T1", 2), "T1@2");
    }

    #[test]
    fn test_versioned_id_rejects_malformed() {
        assert!(VersionedId::parse("T1").is_none());
        assert!(VersionedId::parse("@2").is_none());
        assert!(VersionedId::parse("T1@two").is_none());
    }

    #[test]
    fn test_versioned_id_keeps_at_signs_in_id() {
        // Only the last separator splits id from version.
        let parsed = VersionedId::parse("a@b@3").expect("parse");
        assert_eq!(parsed.id, "a@b");
        assert_eq!(parsed.version, 3);
    }
}
