//! Workspace - Main Shell with Layout and Event Pump
//!
//! The workspace holds the header, sidebar, content area, and log panel,
//! and runs the event pump that applies service events to the state
//! entities. Versioned read results are applied through each state's own
//! guard, so a stale response can never overwrite a newer view.

use gpui::{
    div, prelude::*, App, Context, Entity, IntoElement, ParentElement, Render, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::app::navigation::ActivePage;
use crate::components::layout::header::Header;
use crate::components::layout::log_panel::LogPanel;
use crate::components::layout::sidebar::Sidebar;
use crate::eventing::app_event::{AppEvent, MutationKind, ReadTarget};
use crate::features::capabilities::page::CapabilitiesPage;
use crate::features::profiles::page::ProfilesPage;
use crate::features::protocols::page::ProtocolsPage;
use crate::services::runtime;
use crate::state::alert_state::{AlertKind, TOAST_DISMISS_MS};
use crate::state::log_state::LogLevel;
use crate::theme::colors::CtrColors;

/// Main workspace containing the application layout
pub struct Workspace {
    entities: AppEntities,
    header: Entity<Header>,
    sidebar: Entity<Sidebar>,
    log_panel: Entity<LogPanel>,
    // Page views (created lazily and cached)
    protocols_page: Option<Entity<ProtocolsPage>>,
    profiles_page: Option<Entity<ProfilesPage>>,
    capabilities_page: Option<Entity<CapabilitiesPage>>,
}

impl Workspace {
    pub fn new(
        entities: AppEntities,
        event_rx: flume::Receiver<AppEvent>,
        cx: &mut Context<Self>,
    ) -> Self {
        // Create layout components
        let header = cx.new(|cx| Header::new(entities.clone(), cx));
        let sidebar = cx.new(|cx| Sidebar::new(entities.clone(), cx));
        let log_panel = cx.new(|cx| LogPanel::new(entities.clone(), cx));

        // Create the initial page
        let protocols_page = Some(cx.new(|cx| ProtocolsPage::new(entities.clone(), cx)));

        // Start event pump
        Self::start_event_pump(event_rx, entities.clone(), cx);

        // Observe tabs state for page changes
        cx.observe(&entities.tabs, |_this, _, cx| {
            cx.notify();
        })
        .detach();

        Self {
            entities,
            header,
            sidebar,
            log_panel,
            protocols_page,
            profiles_page: None,
            capabilities_page: None,
        }
    }

    /// Start the event pump that dispatches service events to UI
    fn start_event_pump(
        event_rx: flume::Receiver<AppEvent>,
        entities: AppEntities,
        cx: &mut Context<Self>,
    ) {
        cx.spawn(async move |_this, cx| {
            while let Ok(event) = event_rx.recv_async().await {
                let entities = entities.clone();
                let _ = cx.update(|cx: &mut App| {
                    dispatch_event(event, &entities, cx);
                });
            }
        })
        .detach();
    }

    /// Get or create a page view for the given page
    fn get_or_create_page(&mut self, page: ActivePage, cx: &mut Context<Self>) -> gpui::AnyElement {
        match page {
            ActivePage::Protocols => {
                if self.protocols_page.is_none() {
                    self.protocols_page =
                        Some(cx.new(|cx| ProtocolsPage::new(self.entities.clone(), cx)));
                }
                self.protocols_page
                    .clone()
                    .map(|p| p.into_any_element())
                    .unwrap_or_else(|| div().into_any_element())
            }
            ActivePage::Profiles => {
                if self.profiles_page.is_none() {
                    self.profiles_page =
                        Some(cx.new(|cx| ProfilesPage::new(self.entities.clone(), cx)));
                }
                self.profiles_page
                    .clone()
                    .map(|p| p.into_any_element())
                    .unwrap_or_else(|| div().into_any_element())
            }
            ActivePage::Capabilities => {
                if self.capabilities_page.is_none() {
                    self.capabilities_page =
                        Some(cx.new(|cx| CapabilitiesPage::new(self.entities.clone(), cx)));
                }
                self.capabilities_page
                    .clone()
                    .map(|p| p.into_any_element())
                    .unwrap_or_else(|| div().into_any_element())
            }
        }
    }
}

impl Render for Workspace {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let active_page = self.entities.tabs.read(cx).active_page;
        let content = self.get_or_create_page(active_page, cx);

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(CtrColors::background())
            .child(
                // Header
                self.header.clone(),
            )
            .child(
                // Main content area
                div()
                    .flex_1()
                    .flex()
                    .flex_row()
                    .overflow_hidden()
                    .child(
                        // Sidebar
                        self.sidebar.clone(),
                    )
                    .child(
                        // Content
                        div()
                            .flex_1()
                            .flex()
                            .flex_col()
                            .overflow_hidden()
                            .bg(CtrColors::content_bg())
                            .child(content),
                    ),
            )
            .child(
                // Log panel
                self.log_panel.clone(),
            )
    }
}

/// Dispatch an AppEvent to the appropriate entity
fn dispatch_event(event: AppEvent, entities: &AppEntities, cx: &mut App) {
    match event {
        AppEvent::Log {
            level,
            message,
            timestamp,
        } => {
            entities.logs.update(cx, |logs, cx| {
                logs.push(level, message, timestamp);
                cx.notify();
            });
        }
        AppEvent::ProtocolsLoaded {
            version,
            items,
            total_count,
        } => {
            entities.protocols.update(cx, |state, cx| {
                state.protocols.apply_page(version, items, total_count);
                cx.notify();
            });
        }
        AppEvent::ProtocolUsersLoaded {
            version,
            items,
            total_count,
        } => {
            entities.protocols.update(cx, |state, cx| {
                state.apply_users(version, items, total_count);
                cx.notify();
            });
        }
        AppEvent::ProtocolFiltersLoaded {
            protocol_id,
            regions,
            countries,
            sites,
        } => {
            entities.protocols.update(cx, |state, cx| {
                state.apply_filter_options(&protocol_id, regions, countries, sites);
                cx.notify();
            });
        }
        AppEvent::ProfilesLoaded {
            version,
            items,
            total_count,
        } => {
            entities.profiles.update(cx, |state, cx| {
                state.profiles.apply_page(version, items, total_count);
                // Every profile page reload refreshes the detail table;
                // adopting the default profile also rescopes the filter
                // options and the cohort-test mapping.
                state.detail_stale = true;
                if state.adopt_default_profile() {
                    state.filters_stale = true;
                    state.cohort_tests_stale = true;
                }
                cx.notify();
            });
        }
        AppEvent::ProfileFiltersLoaded {
            version, options, ..
        } => {
            entities.profiles.update(cx, |state, cx| {
                state.apply_filter_options(version, options);
                cx.notify();
            });
        }
        AppEvent::ProfileDetailLoaded {
            version,
            items,
            total_count,
        } => {
            entities.profiles.update(cx, |state, cx| {
                state.apply_detail(version, items, total_count);
                cx.notify();
            });
        }
        AppEvent::CohortTestsLoaded {
            profile_id,
            cohorts,
        } => {
            entities.profiles.update(cx, |state, cx| {
                state.set_cohort_tests(&profile_id, cohorts);
                cx.notify();
            });
        }
        AppEvent::CapabilitiesLoaded {
            version,
            items,
            total_count,
        } => {
            entities.capabilities.update(cx, |state, cx| {
                state.apply(version, items, total_count);
                cx.notify();
            });
        }
        AppEvent::ReadFailed {
            target,
            version,
            message,
        } => {
            entities.logs.update(cx, |logs, cx| {
                logs.push(
                    LogLevel::Error,
                    format!("{target:?} load failed: {message}"),
                    chrono::Local::now(),
                );
                cx.notify();
            });
            match target {
                ReadTarget::Protocols => entities.protocols.update(cx, |state, cx| {
                    state.protocols.apply_error(version);
                    cx.notify();
                }),
                ReadTarget::ProtocolUsers => entities.protocols.update(cx, |state, cx| {
                    state.users_failed(version);
                    cx.notify();
                }),
                ReadTarget::Profiles => entities.profiles.update(cx, |state, cx| {
                    state.profiles.apply_error(version);
                    cx.notify();
                }),
                ReadTarget::ProfileDetail => entities.profiles.update(cx, |state, cx| {
                    state.detail_failed(version);
                    cx.notify();
                }),
                ReadTarget::Capabilities => entities.capabilities.update(cx, |state, cx| {
                    state.failed(version);
                    cx.notify();
                }),
                // Filter/mapping loads degrade silently to last-good data.
                ReadTarget::ProtocolFilters
                | ReadTarget::ProfileFilters
                | ReadTarget::CohortTests => {}
            }
        }
        AppEvent::MutationDone {
            kind,
            success,
            message,
        } => {
            apply_mutation_result(kind, success, entities, cx);

            let alert_kind = if success {
                AlertKind::Success
            } else {
                AlertKind::Error
            };
            let ticket = entities.alerts.update(cx, |alerts, cx| {
                let ticket = alerts.show_toast(alert_kind, message.clone(), Some(kind));
                cx.notify();
                ticket
            });
            schedule_toast_dismissal(entities.clone(), ticket, cx);

            entities.logs.update(cx, |logs, cx| {
                let level = if success {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                logs.push(level, message, chrono::Local::now());
                cx.notify();
            });
        }
    }
}

/// Successful writes invalidate the views they touched
fn apply_mutation_result(kind: MutationKind, success: bool, entities: &AppEntities, cx: &mut App) {
    if !success {
        // Failed writes leave local state untouched for a manual retry.
        return;
    }
    match kind {
        MutationKind::UpdateProfileSetting | MutationKind::DeleteBlindHide => {
            entities.profiles.update(cx, |state, cx| {
                state.mark_detail_stale();
                cx.notify();
            });
        }
        MutationKind::AddProfile | MutationKind::DeleteProfiles => {
            entities.profiles.update(cx, |state, cx| {
                state.checked_profiles.clear();
                state.profiles.reset();
                state.selected_profile = None;
                state.profiles_stale = true;
                cx.notify();
            });
        }
        MutationKind::SendEmail | MutationKind::ResendEmail => {}
    }
}

/// Replaceable auto-dismiss for the toast; a stale ticket is a no-op
fn schedule_toast_dismissal(entities: AppEntities, ticket: u64, cx: &mut App) {
    cx.spawn(async move |cx| {
        runtime::run_in_tokio(async {
            tokio::time::sleep(std::time::Duration::from_millis(TOAST_DISMISS_MS)).await;
        })
        .await;
        let _ = cx.update(|cx| {
            entities.alerts.update(cx, |alerts, cx| {
                if alerts.dismiss_toast_if(ticket) {
                    cx.notify();
                }
            });
        });
    })
    .detach();
}
