//! Protocols Controller
//!
//! Owns the intent side of the Manage Protocols page: protocol list
//! paging and search, user-table filters/sort/paging, and the
//! registration-email action.

use gpui::App;

use crate::app::entities::AppEntities;
use crate::components::composite::data_grid::{SortDirection, SortEvent};
use crate::domain::protocol::Protocol;
use crate::eventing::app_event::AppEvent;
use crate::services::api::PageQuery;
use crate::services::debounce::SEARCH_DEBOUNCE_MS;
use crate::services::hub::{ServiceCommand, ServiceHub};
use crate::services::runtime;

/// Which user-table filter a value targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilterField {
    Email,
    FirstName,
    LastName,
    Role,
    Region,
    Country,
    Site,
    Status,
}

/// Protocols page controller
#[derive(Clone)]
pub struct ProtocolsController {
    entities: AppEntities,
}

impl ProtocolsController {
    /// Create a new controller
    pub fn new(entities: AppEntities) -> Self {
        Self { entities }
    }

    /// Request the next protocol-list page (no-op while loading or once
    /// fully loaded)
    pub fn load_protocols(&self, cx: &mut App) {
        let request = self.entities.protocols.update(cx, |state, cx| {
            let request = state.protocols.next_page_request();
            cx.notify();
            request
        });
        let Some(request) = request else {
            return;
        };
        if let Some(hub) = cx.try_global::<ServiceHub>() {
            hub.send(ServiceCommand::LoadProtocols {
                version: request.version,
                query: PageQuery {
                    page: request.page,
                    page_size: request.page_size,
                    search_fields: Some(vec!["studyCode".to_string()]),
                    search_value: (!request.search.is_empty()).then(|| request.search.clone()),
                },
            });
        }
    }

    /// Debounced protocol search; only the last value within the window
    /// triggers a reload
    pub fn search_protocols(&self, term: &str, cx: &mut App) {
        let ticket = self.entities.protocols.update(cx, |state, cx| {
            if !state.protocols.set_search_term(term) {
                return None;
            }
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
                    .protocols
                    .read(cx)
                    .search_debounce
                    .is_current(ticket);
                if current {
                    controller.load_protocols(cx);
                }
            });
        })
        .detach();
    }

    /// Select a protocol: reset the user view, load users and the
    /// per-protocol filter options
    pub fn select_protocol(&self, protocol: Protocol, cx: &mut App) {
        let protocol_id = protocol.protocol_id.clone();
        let study_code = protocol.study_code.clone();
        self.entities.protocols.update(cx, |state, cx| {
            state.select_protocol(protocol);
            cx.notify();
        });
        if let Some(hub) = cx.try_global::<ServiceHub>() {
            hub.log(AppEvent::info(format!("Protocol {study_code} selected")));
            hub.send(ServiceCommand::LoadProtocolFilters { protocol_id });
        }
        self.load_users(cx);
    }

    /// Fetch the user table for the current filters/sort/page
    pub fn load_users(&self, cx: &mut App) {
        let command = self.entities.protocols.update(cx, |state, cx| {
            let selected = state.selected.as_ref()?;
            let protocol_id = selected.protocol_id.clone();
            let version = state.begin_users_load();
            let query = state.user_query();
            cx.notify();
            Some(ServiceCommand::LoadProtocolUsers {
                version,
                protocol_id,
                query,
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    /// Store one user-table filter value (applied on `apply_filters`)
    pub fn set_filter(&self, field: UserFilterField, value: Option<String>, cx: &mut App) {
        self.entities.protocols.update(cx, |state, cx| {
            let slot = match field {
                UserFilterField::Email => &mut state.filters.email,
                UserFilterField::FirstName => &mut state.filters.first_name,
                UserFilterField::LastName => &mut state.filters.last_name,
                UserFilterField::Role => &mut state.filters.role,
                UserFilterField::Region => &mut state.filters.region,
                UserFilterField::Country => &mut state.filters.country,
                UserFilterField::Site => &mut state.filters.site,
                UserFilterField::Status => &mut state.filters.status,
            };
            *slot = value.filter(|v| !v.is_empty());
            cx.notify();
        });
    }

    /// Re-fetch page 1 with the stored filters
    pub fn apply_filters(&self, cx: &mut App) {
        self.entities.protocols.update(cx, |state, cx| {
            state.page = 1;
            cx.notify();
        });
        self.load_users(cx);
    }

    /// Drop all filters and re-fetch
    pub fn clear_filters(&self, cx: &mut App) {
        self.entities.protocols.update(cx, |state, cx| {
            state.filters.clear();
            state.page = 1;
            cx.notify();
        });
        self.load_users(cx);
    }

    /// Grid sort changed
    pub fn sort_changed(&self, event: &SortEvent, cx: &mut App) {
        if event.direction == SortDirection::None {
            return;
        }
        self.entities.protocols.update(cx, |state, cx| {
            state.apply_sort(event);
            cx.notify();
        });
        self.load_users(cx);
    }

    /// Pagination click
    pub fn set_page(&self, page: u32, cx: &mut App) {
        self.entities.protocols.update(cx, |state, cx| {
            state.page = page.max(1);
            cx.notify();
        });
        self.load_users(cx);
    }

    /// Send or resend the registration email to every user of the
    /// selected protocol
    pub fn send_registration_email(&self, resend: bool, cx: &mut App) {
        let selected = self.entities.protocols.read(cx).selected.clone();
        let Some(protocol) = selected else {
            return;
        };
        if let Some(hub) = cx.try_global::<ServiceHub>() {
            hub.send(ServiceCommand::SendRegistrationEmail {
                protocol_id: protocol.protocol_id,
                study_code: protocol.study_code,
                resend,
            });
        }
    }
}
