//! AppEntities - Global Entity Handles
//!
//! All global GPUI entities are collected here for easy access and
//! management. State is split by page/update frequency rather than held
//! in one monolith.

use gpui::{App, AppContext, Entity, Global};

use crate::state::{
    alert_state::AlertState, capabilities_state::CapabilitiesState, i18n_state::I18nState,
    log_state::LogState, profiles_state::ProfilesState, protocols_state::ProtocolsState,
    tabs_state::TabsState,
};

/// Collection of all global Entity handles
#[derive(Clone)]
pub struct AppEntities {
    /// Manage Protocols page state
    pub protocols: Entity<ProtocolsState>,
    /// Manage Profiles page state
    pub profiles: Entity<ProfilesState>,
    /// Manage Capabilities page state
    pub capabilities: Entity<CapabilitiesState>,
    /// Toast and validation alerts
    pub alerts: Entity<AlertState>,
    /// Activity log (ring buffer)
    pub logs: Entity<LogState>,
    /// Page navigation state
    pub tabs: Entity<TabsState>,
    /// Internationalization state
    pub i18n: Entity<I18nState>,
}

impl Global for AppEntities {}

impl AppEntities {
    /// Initialize all entities with default values
    pub fn init(cx: &mut App) -> Self {
        Self {
            protocols: cx.new(|_| ProtocolsState::default()),
            profiles: cx.new(|_| ProfilesState::default()),
            capabilities: cx.new(|_| CapabilitiesState::default()),
            alerts: cx.new(|_| AlertState::default()),
            logs: cx.new(|_| LogState::new(2000)),
            tabs: cx.new(|_| TabsState::default()),
            i18n: cx.new(|_| I18nState::default()),
        }
    }
}
