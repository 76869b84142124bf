//! ServiceHub - Backend Request Orchestration
//!
//! The hub owns the bridge between the GPUI side and the REST client:
//! controllers enqueue `ServiceCommand`s, a dedicated thread with a tokio
//! runtime executes them (concurrently, one task per command), and every
//! outcome returns to the UI as an `AppEvent` on the event channel. No
//! failure escapes this boundary.

use std::sync::Arc;

use gpui::Global;
use parking_lot::RwLock;

use crate::domain::config::AppConfig;
use crate::eventing::app_event::{AppEvent, FilterScope, MutationKind, ReadTarget};
use crate::services::api::{
    AddProfileRequest, AdminApi, BulkDeleteProfilesRequest, CapabilityQuery,
    DeleteProfileSettingsRequest, PageQuery, ProfileDetailQuery, ProfilePageQuery,
    UpdateProfileSettingRequest, UserDetailQuery,
};
use crate::utils::crypto;

/// Commands controllers can enqueue
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    LoadProtocols {
        version: u64,
        query: PageQuery,
    },
    LoadProtocolUsers {
        version: u64,
        protocol_id: String,
        query: UserDetailQuery,
    },
    LoadProtocolFilters {
        protocol_id: String,
    },
    LoadProfiles {
        version: u64,
        query: ProfilePageQuery,
    },
    LoadProfileFilters {
        version: u64,
        scope: FilterScope,
    },
    LoadProfileDetail {
        version: u64,
        protocol_id: String,
        query: ProfileDetailQuery,
    },
    LoadCohortTests {
        profile_id: String,
    },
    LoadCapabilities {
        version: u64,
        query: CapabilityQuery,
    },
    UpdateProfileSetting {
        setting_id: String,
        request: UpdateProfileSettingRequest,
    },
    AddProfile {
        request: AddProfileRequest,
        study_code: String,
    },
    DeleteProfiles {
        request: BulkDeleteProfilesRequest,
        profile_names: Vec<String>,
        study_code: String,
    },
    DeleteBlindHide {
        request: DeleteProfileSettingsRequest,
    },
    SendRegistrationEmail {
        protocol_id: String,
        study_code: String,
        resend: bool,
    },
    /// Rebuild the REST client from new configuration
    UpdateConfig(AppConfig),
}

/// ServiceHub bridges UI intent to backend calls
pub struct ServiceHub {
    /// Channel to send events to UI
    event_tx: flume::Sender<AppEvent>,
    /// Channel to send commands to the worker
    command_tx: flume::Sender<ServiceCommand>,
    /// Current REST client, shared with the worker. Also used directly by
    /// controllers for one-shot catalog page fetches.
    api: Arc<RwLock<Option<Arc<AdminApi>>>>,
}

impl Global for ServiceHub {}

impl ServiceHub {
    /// Create a new service hub and start its worker thread
    pub fn new(config: AppConfig, event_tx: flume::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = flume::unbounded::<ServiceCommand>();
        let api: Arc<RwLock<Option<Arc<AdminApi>>>> = Arc::new(RwLock::new(None));

        match Self::build_api(&config) {
            Ok(client) => *api.write() = Some(Arc::new(client)),
            Err(e) => {
                let _ = event_tx.send(AppEvent::error(format!(
                    "API client initialisation failed: {e}"
                )));
            }
        }

        let hub = Self {
            event_tx: event_tx.clone(),
            command_tx,
            api: api.clone(),
        };

        Self::start_worker(api, command_rx, event_tx);
        hub
    }

    /// Current REST client, for one-shot calls from controllers
    pub fn api(&self) -> Option<Arc<AdminApi>> {
        self.api.read().clone()
    }

    /// Enqueue a command
    pub fn send(&self, command: ServiceCommand) {
        if self.command_tx.send(command).is_err() {
            tracing::error!("Service worker is gone; command dropped");
        }
    }

    /// Send a log event to the UI
    pub fn log(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    fn build_api(config: &AppConfig) -> crate::error::Result<AdminApi> {
        let token = match &config.api.encrypted_token {
            Some(encrypted) => Some(crypto::decrypt(encrypted)?),
            None => None,
        };
        AdminApi::new(&config.api, token.as_deref())
    }

    /// Worker thread: owns the tokio runtime, executes commands as
    /// independent tasks so slow reads never block mutations.
    fn start_worker(
        api: Arc<RwLock<Option<Arc<AdminApi>>>>,
        command_rx: flume::Receiver<ServiceCommand>,
        event_tx: flume::Sender<AppEvent>,
    ) {
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to create Tokio runtime");

            rt.block_on(async move {
                while let Ok(command) = command_rx.recv_async().await {
                    if let ServiceCommand::UpdateConfig(new_config) = &command {
                        match Self::build_api(new_config) {
                            Ok(client) => {
                                *api.write() = Some(Arc::new(client));
                                let _ = event_tx.send(AppEvent::info("Configuration updated"));
                            }
                            Err(e) => {
                                let _ = event_tx.send(AppEvent::error(format!(
                                    "Configuration rejected: {e}"
                                )));
                            }
                        }
                        continue;
                    }

                    let Some(client) = api.read().clone() else {
                        let _ = event_tx.send(AppEvent::error(
                            "No API client configured; command dropped",
                        ));
                        continue;
                    };
                    let events = event_tx.clone();
                    tokio::spawn(async move {
                        handle_command(client, events, command).await;
                    });
                }
            });
        });
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub").finish()
    }
}

/// Execute one command and convert the outcome to events
async fn handle_command(
    api: Arc<AdminApi>,
    events: flume::Sender<AppEvent>,
    command: ServiceCommand,
) {
    match command {
        ServiceCommand::LoadProtocols { version, query } => {
            match api.activated_protocols(&query).await {
                Ok(page) => {
                    let _ = events.send(AppEvent::ProtocolsLoaded {
                        version,
                        items: page.items,
                        total_count: page.total_count,
                    });
                }
                Err(e) => read_failed(&events, ReadTarget::Protocols, version, e),
            }
        }
        ServiceCommand::LoadProtocolUsers {
            version,
            protocol_id,
            query,
        } => match api.protocol_users(&protocol_id, &query).await {
            Ok(detail) => {
                let _ = events.send(AppEvent::ProtocolUsersLoaded {
                    version,
                    items: detail.items,
                    total_count: detail.filtered_total_count,
                });
            }
            Err(e) => read_failed(&events, ReadTarget::ProtocolUsers, version, e),
        },
        ServiceCommand::LoadProtocolFilters { protocol_id } => {
            let (regions, countries, sites) = tokio::join!(
                api.protocol_regions(&protocol_id),
                api.protocol_countries(&protocol_id),
                api.protocol_sites(&protocol_id),
            );
            match (regions, countries, sites) {
                (Ok(regions), Ok(countries), Ok(sites)) => {
                    let _ = events.send(AppEvent::ProtocolFiltersLoaded {
                        protocol_id,
                        regions,
                        countries,
                        sites,
                    });
                }
                (regions, countries, sites) => {
                    let error = [
                        regions.err().map(|e| e.to_string()),
                        countries.err().map(|e| e.to_string()),
                        sites.err().map(|e| e.to_string()),
                    ]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join("; ");
                    let _ = events.send(AppEvent::ReadFailed {
                        target: ReadTarget::ProtocolFilters,
                        version: 0,
                        message: error,
                    });
                }
            }
        }
        ServiceCommand::LoadProfiles { version, query } => {
            match api.report_profiles(&query).await {
                Ok(page) => {
                    let _ = events.send(AppEvent::ProfilesLoaded {
                        version,
                        items: page.items,
                        total_count: page.total_count,
                    });
                }
                Err(e) => read_failed(&events, ReadTarget::Profiles, version, e),
            }
        }
        ServiceCommand::LoadProfileFilters { version, scope } => {
            let result = match &scope {
                FilterScope::Protocol(protocol_id) => {
                    api.protocol_filter_options(protocol_id).await
                }
                FilterScope::Profile(profile_id) => api.profile_filter_options(profile_id).await,
            };
            match result {
                Ok(options) => {
                    let _ = events.send(AppEvent::ProfileFiltersLoaded {
                        version,
                        scope,
                        options,
                    });
                }
                Err(e) => read_failed(&events, ReadTarget::ProfileFilters, version, e),
            }
        }
        ServiceCommand::LoadProfileDetail {
            version,
            protocol_id,
            query,
        } => match api.profile_detail(&protocol_id, &query).await {
            Ok(page) => {
                let _ = events.send(AppEvent::ProfileDetailLoaded {
                    version,
                    items: page.items,
                    total_count: page.total_count,
                });
            }
            Err(e) => read_failed(&events, ReadTarget::ProfileDetail, version, e),
        },
        ServiceCommand::LoadCohortTests { profile_id } => {
            match api.tests_and_cohorts(&profile_id).await {
                Ok(response) => {
                    let _ = events.send(AppEvent::CohortTestsLoaded {
                        profile_id,
                        cohorts: response.cohorts,
                    });
                }
                Err(e) => read_failed(&events, ReadTarget::CohortTests, 0, e),
            }
        }
        ServiceCommand::LoadCapabilities { version, query } => {
            match api.capabilities(&query).await {
                Ok(response) => {
                    let _ = events.send(AppEvent::CapabilitiesLoaded {
                        version,
                        items: response.data.items,
                        total_count: response.data.total_count,
                    });
                }
                Err(e) => read_failed(&events, ReadTarget::Capabilities, version, e),
            }
        }
        ServiceCommand::UpdateProfileSetting {
            setting_id,
            request,
        } => {
            let result = api.update_profile_setting(&setting_id, &request).await;
            mutation_done(
                &events,
                MutationKind::UpdateProfileSetting,
                result.map(|r| r.success),
                "Profile settings updated successfully.".to_string(),
                "Failed to update profile settings. Please try again.".to_string(),
            );
        }
        ServiceCommand::AddProfile {
            request,
            study_code,
        } => {
            let name = request.profile_name.clone();
            let result = api.add_report_profile(&request).await;
            mutation_done(
                &events,
                MutationKind::AddProfile,
                result.map(|r| r.success),
                format!("{name} is added to the Profile list for {study_code} successfully."),
                "Please try again.".to_string(),
            );
        }
        ServiceCommand::DeleteProfiles {
            request,
            profile_names,
            study_code,
        } => {
            let verb = if profile_names.len() > 1 { "are" } else { "is" };
            let names = profile_names.join(", ");
            let result = api.bulk_delete_profiles(&request).await;
            mutation_done(
                &events,
                MutationKind::DeleteProfiles,
                result.map(|r| r.success),
                format!("{names} {verb} removed from {study_code} successfully."),
                "Please try again.".to_string(),
            );
        }
        ServiceCommand::DeleteBlindHide { request } => {
            let result = api.delete_profile_settings(&request).await;
            mutation_done(
                &events,
                MutationKind::DeleteBlindHide,
                result.map(|r| r.success),
                "The Blind/Hide Configuration is removed from the Profile successfully."
                    .to_string(),
                "Please try again.".to_string(),
            );
        }
        ServiceCommand::SendRegistrationEmail {
            protocol_id,
            study_code,
            resend,
        } => {
            let kind = if resend {
                MutationKind::ResendEmail
            } else {
                MutationKind::SendEmail
            };
            let sent = if resend { "re-sent" } else { "sent" };
            let result = api.send_registration_email(&protocol_id, resend).await;
            mutation_done(
                &events,
                kind,
                result.map(|r| r.success),
                format!("Email has been {sent} successfully to all the users in {study_code}."),
                "Please try again.".to_string(),
            );
        }
        ServiceCommand::UpdateConfig(_) => {
            // Handled by the worker loop before dispatch.
        }
    }
}

fn read_failed(
    events: &flume::Sender<AppEvent>,
    target: ReadTarget,
    version: u64,
    error: crate::error::Error,
) {
    tracing::warn!("read failed ({target:?}): {error}");
    let _ = events.send(AppEvent::ReadFailed {
        target,
        version,
        message: error.to_string(),
    });
}

fn mutation_done(
    events: &flume::Sender<AppEvent>,
    kind: MutationKind,
    result: crate::error::Result<bool>,
    success_message: String,
    failure_message: String,
) {
    let (success, message) = match result {
        Ok(true) => (true, success_message),
        Ok(false) => (false, failure_message),
        Err(e) => {
            tracing::warn!("mutation failed ({kind:?}): {e}");
            (false, failure_message)
        }
    };
    let _ = events.send(AppEvent::MutationDone {
        kind,
        success,
        message,
    });
}
