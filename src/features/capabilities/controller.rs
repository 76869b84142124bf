//! Capabilities Controller
//!
//! Intent side of the Manage Capabilities page. Every view change is
//! persisted to the config store so the page comes back exactly as it
//! was left, the desktop counterpart of the web version's URL query
//! parameters.

use gpui::App;

use crate::app::entities::AppEntities;
use crate::components::composite::data_grid::{SortDirection, SortEvent};
use crate::domain::config::AppConfig;
use crate::services::debounce::SEARCH_DEBOUNCE_MS;
use crate::services::hub::{ServiceCommand, ServiceHub};
use crate::services::runtime;
use crate::utils::config_store;

/// Which capability filter a value targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityFilterField {
    Search,
    CapabilityName,
    Url,
}

/// Capabilities page controller
#[derive(Clone)]
pub struct CapabilitiesController {
    entities: AppEntities,
}

impl CapabilitiesController {
    /// Create a new controller
    pub fn new(entities: AppEntities) -> Self {
        Self { entities }
    }

    /// Restore the persisted view and load it
    pub fn restore_view(&self, cx: &mut App) {
        match config_store::load_config::<AppConfig>(config_store::CONFIG_FILE) {
            Ok(config) => {
                self.entities.capabilities.update(cx, |state, cx| {
                    state.restore_view(&config.capability_view);
                    cx.notify();
                });
            }
            Err(e) => tracing::warn!("capability view restore failed: {e}"),
        }
        self.load(cx);
    }

    /// Fetch the capability table for the current view, persisting the
    /// view alongside
    pub fn load(&self, cx: &mut App) {
        let command = self.entities.capabilities.update(cx, |state, cx| {
            let version = state.begin_load();
            let query = state.query();
            cx.notify();
            ServiceCommand::LoadCapabilities { version, query }
        });
        if let Some(hub) = cx.try_global::<ServiceHub>() {
            hub.send(command);
        }
        self.persist_view(cx);
    }

    /// Store one filter value and reload after the debounce window
    pub fn set_filter(&self, field: CapabilityFilterField, value: String, cx: &mut App) {
        let ticket = self.entities.capabilities.update(cx, |state, cx| {
            let slot = match field {
                CapabilityFilterField::Search => &mut state.search,
                CapabilityFilterField::CapabilityName => &mut state.capability_name,
                CapabilityFilterField::Url => &mut state.url,
            };
            if *slot == value {
                return None;
            }
            *slot = value;
            state.page = 1;
            cx.notify();
            Some(state.search_debounce.arm())
        });
        let Some(ticket) = ticket else {
            return;
        };

        let controller = self.clone();
        cx.spawn(async move |cx| {
            runtime::run_in_tokio(async {
                tokio::time::sleep(std::time::Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
            })
            .await;
            let _ = cx.update(|cx| {
                let current = controller
                    .entities
                    .capabilities
                    .read(cx)
                    .search_debounce
                    .is_current(ticket);
                if current {
                    controller.load(cx);
                }
            });
        })
        .detach();
    }

    pub fn clear_filters(&self, cx: &mut App) {
        self.entities.capabilities.update(cx, |state, cx| {
            state.clear_filters();
            cx.notify();
        });
        self.load(cx);
    }

    /// Grid sort changed
    pub fn sort_changed(&self, event: &SortEvent, cx: &mut App) {
        if event.direction == SortDirection::None {
            return;
        }
        self.entities.capabilities.update(cx, |state, cx| {
            state.apply_sort(event);
            cx.notify();
        });
        self.load(cx);
    }

    /// Pagination click
    pub fn set_page(&self, page: u32, cx: &mut App) {
        self.entities.capabilities.update(cx, |state, cx| {
            state.page = page.max(1);
            cx.notify();
        });
        self.load(cx);
    }

    fn persist_view(&self, cx: &mut App) {
        let view = self.entities.capabilities.read(cx).view_config();
        let result = config_store::load_config::<AppConfig>(config_store::CONFIG_FILE)
            .and_then(|mut config| {
                config.capability_view = view;
                config_store::save_config(config_store::CONFIG_FILE, &config)
            });
        if let Err(e) = result {
            tracing::warn!("capability view persistence failed: {e}");
        }
    }
}
