//! User - Protocol-Associated User Data

use serde::{Deserialize, Serialize};

/// A user associated with a protocol
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedUser {
    /// Login email, unique per protocol
    pub user_email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Role within the protocol (e.g. "CRA", "Medical Monitor")
    #[serde(default)]
    pub user_role: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub site: String,
    /// "Active" / "Inactive"
    #[serde(default)]
    pub user_status: String,
}
