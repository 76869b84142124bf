//! Capability - Platform Capability Data

use serde::{Deserialize, Serialize};

/// A platform capability (a named feature endpoint)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Unique capability id
    pub capability_id: String,
    /// Human-readable name
    pub capability_name: String,
    /// Backing URL of the capability
    pub url: String,
}
