//! AppEvent - Application Event Enum
//!
//! All events that can be sent from the service layer to the UI. Read
//! results carry the version of the request that produced them so stale
//! responses can be discarded by the state layer.

use chrono::{DateTime, Local};

use crate::domain::capability::Capability;
use crate::domain::profile::{Profile, ProfileSetting};
use crate::domain::protocol::Protocol;
use crate::domain::user::AssociatedUser;
use crate::services::api::{CohortTests, ProfileFilterOptions};
use crate::state::log_state::LogLevel;

/// Which read a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTarget {
    Protocols,
    ProtocolUsers,
    ProtocolFilters,
    Profiles,
    ProfileFilters,
    ProfileDetail,
    CohortTests,
    Capabilities,
}

/// Which write a result belongs to; alerts are keyed by this
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateProfileSetting,
    AddProfile,
    DeleteProfiles,
    DeleteBlindHide,
    SendEmail,
    ResendEmail,
}

/// Scope of a filter-options load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterScope {
    Protocol(String),
    Profile(String),
}

/// Application events for service -> UI communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Log message
    Log {
        level: LogLevel,
        message: String,
        timestamp: DateTime<Local>,
    },

    /// A page of activated protocols arrived
    ProtocolsLoaded {
        version: u64,
        items: Vec<Protocol>,
        total_count: usize,
    },

    /// Users of the selected protocol arrived
    ProtocolUsersLoaded {
        version: u64,
        items: Vec<AssociatedUser>,
        total_count: usize,
    },

    /// Region/country/site filter options for a protocol arrived
    ProtocolFiltersLoaded {
        protocol_id: String,
        regions: Vec<String>,
        countries: Vec<String>,
        sites: Vec<String>,
    },

    /// A page of report profiles arrived
    ProfilesLoaded {
        version: u64,
        items: Vec<Profile>,
        total_count: usize,
    },

    /// Test/cohort/visit filter options arrived
    ProfileFiltersLoaded {
        version: u64,
        scope: FilterScope,
        options: ProfileFilterOptions,
    },

    /// A page of blind/hide profile settings arrived
    ProfileDetailLoaded {
        version: u64,
        items: Vec<ProfileSetting>,
        total_count: usize,
    },

    /// Cohort-test mapping for the validation arrived
    CohortTestsLoaded {
        profile_id: String,
        cohorts: Vec<CohortTests>,
    },

    /// A page of capabilities arrived
    CapabilitiesLoaded {
        version: u64,
        items: Vec<Capability>,
        total_count: usize,
    },

    /// A read failed; consumers degrade to last-good data
    ReadFailed {
        target: ReadTarget,
        version: u64,
        message: String,
    },

    /// A write finished, successfully or not
    MutationDone {
        kind: MutationKind,
        success: bool,
        message: String,
    },
}

impl AppEvent {
    /// Create a log event with current timestamp
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Create an info log event
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log event
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log event
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }
}
