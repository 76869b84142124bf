//! Config - Application Configuration

use serde::{Deserialize, Serialize};

use crate::components::composite::data_grid::sort::SortDirection;

/// Main application configuration, persisted as TOML in the app data dir
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Backend API configuration
    pub api: ApiConfig,
    /// UI preferences
    pub ui: UiConfig,
    /// Persisted capability view (page/sort/filters)
    pub capability_view: CapabilityViewConfig,
}

/// Backend API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the reporting platform API
    pub base_url: String,
    /// Bearer token, stored encrypted at rest (see `utils::crypto`)
    pub encrypted_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://reporting.ctr-platform.local/api/v1".to_string(),
            encrypted_token: None,
            timeout_secs: 30,
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Locale code ("en-US" / "zh-CN")
    pub locale: String,
    /// Page size for detail tables
    pub page_size: u32,
    /// Page size for lazily-paged dropdown catalogs
    pub catalog_page_size: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            page_size: 20,
            catalog_page_size: 40,
        }
    }
}

/// Persisted view state of the capability page.
///
/// The web version of the platform keeps this in URL query parameters so
/// views are bookmarkable; the desktop client restores it from config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityViewConfig {
    pub page: u32,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub search: String,
    pub capability_name: String,
    pub url: String,
}

impl Default for CapabilityViewConfig {
    fn default() -> Self {
        Self {
            page: 1,
            sort_field: String::new(),
            sort_direction: SortDirection::None,
            search: String::new(),
            capability_name: String::new(),
            url: String::new(),
        }
    }
}
