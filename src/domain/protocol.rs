//! Protocol - Clinical Trial Protocol Data

use serde::{Deserialize, Serialize};

/// Lifecycle status of a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProtocolStatus {
    #[default]
    Active,
    Closed,
    Open,
}

impl ProtocolStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ProtocolStatus::Active => "Active",
            ProtocolStatus::Closed => "Closed",
            ProtocolStatus::Open => "Open",
        }
    }
}

/// An activated clinical trial protocol
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    /// Unique protocol id
    pub protocol_id: String,
    /// Study code shown everywhere in the UI
    pub study_code: String,
    /// Sponsor organisation
    #[serde(default)]
    pub sponsor: String,
    /// Study type classification
    #[serde(default)]
    pub study_type: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProtocolStatus,
    /// Whether the status has been manually overridden
    #[serde(default)]
    pub overwrite_status: bool,
}
