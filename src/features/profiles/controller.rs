//! Profiles Controller
//!
//! Intent side of the Manage Profiles page: protocol selection, the lazy
//! profile list, filter catalogs, the blind/hide detail table, inline
//! edit persistence, cohort-test validation, and the bulk removals.

use gpui::App;

use crate::app::entities::AppEntities;
use crate::components::composite::data_grid::{CheckboxState, RowSelection, SortDirection, SortEvent};
use crate::domain::profile::{BlindOrHide, Profile};
use crate::eventing::app_event::{AppEvent, FilterScope};
use crate::i18n::t;
use crate::services::api::{BulkDeleteProfilesRequest, DeleteProfileSettingsRequest, ProfilePageQuery};
use crate::services::debounce::SEARCH_DEBOUNCE_MS;
use crate::services::hub::{ServiceCommand, ServiceHub};
use crate::services::runtime;
use crate::state::alert_state::VALIDATION_DISMISS_MS;
use crate::state::profiles_state::{CohortCheck, ProfileRow};

/// Which detail filter a selection targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFilterField {
    Tests,
    Cohorts,
    Visits,
}

/// Profiles page controller
#[derive(Clone)]
pub struct ProfilesController {
    entities: AppEntities,
}

impl ProfilesController {
    /// Create a new controller
    pub fn new(entities: AppEntities) -> Self {
        Self { entities }
    }

    // ---- protocol selection -----------------------------------------------

    /// A protocol was chosen in the dropdown
    pub fn protocol_selected(&self, protocol_id: String, study_code: String, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.select_protocol(protocol_id.clone(), study_code.clone());
            cx.notify();
        });
        if let Some(hub) = cx.try_global::<ServiceHub>() {
            hub.log(AppEvent::info(format!(
                "Protocol {study_code} selected for profile management"
            )));
        }
        self.load_profiles(cx);
        self.load_filter_options(cx);
    }

    // ---- profile list -----------------------------------------------------

    /// Request the next profile-list page
    pub fn load_profiles(&self, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, cx| {
            state.profiles_stale = false;
            let (protocol_id, _) = state.selected_protocol.clone()?;
            let request = state.profiles.next_page_request()?;
            cx.notify();
            Some(ServiceCommand::LoadProfiles {
                version: request.version,
                query: ProfilePageQuery {
                    page: request.page,
                    page_size: request.page_size,
                    protocol_id,
                    search_value: (!request.search.is_empty()).then(|| request.search.clone()),
                },
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    /// Debounced profile search
    pub fn search_profiles(&self, term: &str, cx: &mut App) {
        let ticket = self.entities.profiles.update(cx, |state, cx| {
            if !state.profiles.set_search_term(term) {
                return None;
            }
            cx.notify();
            Some(state.profile_search_debounce.arm())
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
                    .profiles
                    .read(cx)
                    .profile_search_debounce
                    .is_current(ticket);
                if current {
                    controller.load_profiles(cx);
                }
            });
        })
        .detach();
    }

    /// A profile was picked in the list
    pub fn select_profile(&self, profile: Profile, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.select_profile(profile);
            cx.notify();
        });
        self.load_detail(cx);
        self.load_filter_options(cx);
        self.load_cohort_tests(cx);
    }

    pub fn toggle_profile_checked(&self, profile_id: &str, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.toggle_profile_checked(profile_id);
            cx.notify();
        });
    }

    // ---- filter options and cohort mapping --------------------------------

    /// Reload the test/cohort/visit option sets, scoped to the selected
    /// profile when there is one, the protocol otherwise
    pub fn load_filter_options(&self, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, cx| {
            state.filters_stale = false;
            let scope = match (&state.selected_profile, &state.selected_protocol) {
                (Some(profile), _) => FilterScope::Profile(profile.profile_id.clone()),
                (None, Some((protocol_id, _))) => FilterScope::Protocol(protocol_id.clone()),
                (None, None) => return None,
            };
            let version = state.begin_filters_load();
            cx.notify();
            Some(ServiceCommand::LoadProfileFilters { version, scope })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    /// Reload the cohort-test mapping of the selected profile
    pub fn load_cohort_tests(&self, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, _cx| {
            state.cohort_tests_stale = false;
            let profile = state.selected_profile.as_ref()?;
            Some(ServiceCommand::LoadCohortTests {
                profile_id: profile.profile_id.clone(),
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    // ---- detail table -----------------------------------------------------

    /// Fetch the blind/hide table for the current filters/sort/page
    pub fn load_detail(&self, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, cx| {
            let query = state.detail_query()?;
            let (protocol_id, _) = state.selected_protocol.clone()?;
            let version = state.begin_detail_load();
            cx.notify();
            Some(ServiceCommand::LoadProfileDetail {
                version,
                protocol_id,
                query,
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    /// Debounced free-text search over the detail table
    pub fn search_detail(&self, term: &str, cx: &mut App) {
        let ticket = self.entities.profiles.update(cx, |state, cx| {
            if state.search_text == term {
                return None;
            }
            state.search_text = term.to_string();
            state.page = 1;
            cx.notify();
            Some(state.detail_search_debounce.arm())
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
                    .profiles
                    .read(cx)
                    .detail_search_debounce
                    .is_current(ticket);
                if current {
                    controller.load_detail(cx);
                }
            });
        })
        .detach();
    }

    /// Store a detail filter selection (applied on `apply_filters`)
    pub fn set_filter(&self, field: DetailFilterField, ids: Vec<String>, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            match field {
                DetailFilterField::Tests => state.filter_tests = ids,
                DetailFilterField::Cohorts => state.filter_cohorts = ids,
                DetailFilterField::Visits => state.filter_visits = ids,
            }
            cx.notify();
        });
    }

    pub fn set_blind_filter(&self, value: Option<BlindOrHide>, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.filter_blind = value;
            cx.notify();
        });
    }

    pub fn apply_filters(&self, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.page = 1;
            cx.notify();
        });
        self.load_detail(cx);
    }

    pub fn clear_filters(&self, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.clear_filters();
            state.page = 1;
            cx.notify();
        });
        self.load_detail(cx);
    }

    /// Grid sort changed
    pub fn sort_changed(&self, event: &SortEvent, cx: &mut App) {
        if event.direction == SortDirection::None {
            return;
        }
        self.entities.profiles.update(cx, |state, cx| {
            state.apply_sort(event);
            cx.notify();
        });
        self.load_detail(cx);
    }

    /// Pagination click
    pub fn set_page(&self, page: u32, cx: &mut App) {
        self.entities.profiles.update(cx, |state, cx| {
            state.page = page.max(1);
            cx.notify();
        });
        self.load_detail(cx);
    }

    // ---- inline editing ---------------------------------------------------

    /// A grid row was saved: rebuild the structured setting from the
    /// edited values and persist it. Local state stays untouched until
    /// the success event triggers a refetch. Tests spanning more than
    /// one cohort block the save locally; no request is issued.
    pub fn row_saved(&self, row: &ProfileRow, cx: &mut App) {
        if self
            .entities
            .profiles
            .read(cx)
            .check_tests_cohort(&row.tests_values)
            == CohortCheck::Conflict
        {
            self.edit_tests_changed(&row.tests_values, cx);
            return;
        }
        let command = self.entities.profiles.update(cx, |state, _cx| {
            let mut row = row.clone();
            row.rehydrate(
                &state.test_options,
                &state.cohort_options,
                &state.visit_options,
            );
            let profile_id = state
                .selected_profile
                .as_ref()
                .map(|p| p.profile_id.clone())?;
            Some(ServiceCommand::UpdateProfileSetting {
                setting_id: row.setting.profile_setting_id.clone(),
                request: row.update_request(&profile_id),
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.log(AppEvent::info("Saving profile setting..."));
            hub.send(command);
        }
    }

    /// Edited test selection changed: block the save path with an inline
    /// notice when the tests span more than one cohort
    pub fn edit_tests_changed(&self, selected: &[String], cx: &mut App) {
        let check = self.entities.profiles.read(cx).check_tests_cohort(selected);
        if check == CohortCheck::Conflict {
            let locale = self.entities.i18n.read(cx).locale;
            let message = t(locale, "validation-cohort").to_string();
            let ticket = self.entities.alerts.update(cx, |alerts, cx| {
                let ticket = alerts.show_validation(message);
                cx.notify();
                ticket
            });
            let alerts = self.entities.alerts.clone();
            cx.spawn(async move |cx| {
                runtime::run_in_tokio(async {
                    tokio::time::sleep(std::time::Duration::from_millis(VALIDATION_DISMISS_MS))
                        .await;
                })
                .await;
                let _ = cx.update(|cx| {
                    alerts.update(cx, |alerts, cx| {
                        if alerts.dismiss_validation_if(ticket) {
                            cx.notify();
                        }
                    });
                });
            })
            .detach();
        } else {
            self.entities.alerts.update(cx, |alerts, cx| {
                alerts.clear_validation();
                cx.notify();
            });
        }
    }

    // ---- bulk removals ----------------------------------------------------

    /// Remove the profiles ticked in the list
    pub fn remove_checked_profiles(&self, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, _cx| {
            if state.checked_profiles.is_empty() {
                return None;
            }
            let (_, study_code) = state.selected_protocol.clone()?;
            Some(ServiceCommand::DeleteProfiles {
                request: BulkDeleteProfilesRequest {
                    profile_ids: state.checked_profiles.iter().cloned().collect(),
                },
                profile_names: state.checked_profile_names(),
                study_code,
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }

    /// Remove the blind/hide configuration for the rows checked in the
    /// grid. The exception-set encoding expands back to explicit ids;
    /// `is_delete_all` covers the exact all-checked case.
    pub fn remove_blind_hide(&self, selection: &RowSelection, cx: &mut App) {
        let command = self.entities.profiles.update(cx, |state, _cx| {
            let checked_ids: Vec<String> = state
                .rows
                .iter()
                .enumerate()
                .filter(|(index, row)| {
                    selection.is_row_checked(*index, Some(&row.setting.profile_setting_id))
                })
                .map(|(_, row)| row.setting.profile_setting_id.clone())
                .collect();
            if checked_ids.is_empty() {
                return None;
            }
            Some(ServiceCommand::DeleteBlindHide {
                request: DeleteProfileSettingsRequest {
                    profile_setting_ids: checked_ids,
                    is_delete_all: selection.state() == CheckboxState::AllChecked,
                },
            })
        });
        if let (Some(command), Some(hub)) = (command, cx.try_global::<ServiceHub>()) {
            hub.send(command);
        }
    }
}
