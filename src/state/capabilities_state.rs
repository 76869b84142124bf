//! CapabilitiesState - Capability List State
//!
//! A flat, sortable, filterable capability table. The current view (page,
//! sort, filters) is persisted to the config store and restored on
//! startup, standing in for the web version's bookmarkable URL query
//! parameters.

use ahash::AHashMap;

use crate::components::composite::data_grid::{CellValue, GridRow, SortDirection, SortEvent};
use crate::domain::capability::Capability;
use crate::domain::config::CapabilityViewConfig;
use crate::services::api::CapabilityQuery;
use crate::services::debounce::Debouncer;

/// Page size of the capability table
pub const CAPABILITY_PAGE_SIZE: u32 = 20;

impl GridRow for Capability {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "capabilityName" => CellValue::Text(self.capability_name.clone()),
            "url" => CellValue::Text(self.url.clone()),
            _ => CellValue::Missing,
        }
    }

    fn apply_edit(&mut self, _values: &AHashMap<String, Vec<String>>) {
        // Capability rows are not editable inline.
    }

    fn row_key(&self) -> Option<String> {
        Some(self.capability_id.clone())
    }
}

/// State for the Manage Capabilities page
pub struct CapabilitiesState {
    pub rows: Vec<Capability>,
    pub total: usize,
    version: u64,
    pub loading: bool,
    pub has_error: bool,
    pub page: u32,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub search: String,
    pub capability_name: String,
    pub url: String,
    pub search_debounce: Debouncer,
}

impl Default for CapabilitiesState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            version: 0,
            loading: false,
            has_error: false,
            page: 1,
            sort_field: String::new(),
            sort_direction: SortDirection::None,
            search: String::new(),
            capability_name: String::new(),
            url: String::new(),
            search_debounce: Debouncer::new(),
        }
    }
}

impl CapabilitiesState {
    /// Restore the persisted view
    pub fn restore_view(&mut self, view: &CapabilityViewConfig) {
        self.page = view.page.max(1);
        self.sort_field = view.sort_field.clone();
        self.sort_direction = view.sort_direction;
        self.search = view.search.clone();
        self.capability_name = view.capability_name.clone();
        self.url = view.url.clone();
    }

    /// Snapshot the view for persistence
    pub fn view_config(&self) -> CapabilityViewConfig {
        CapabilityViewConfig {
            page: self.page,
            sort_field: self.sort_field.clone(),
            sort_direction: self.sort_direction,
            search: self.search.clone(),
            capability_name: self.capability_name.clone(),
            url: self.url.clone(),
        }
    }

    /// Begin a load; returns the version the response must echo
    pub fn begin_load(&mut self) -> u64 {
        self.version += 1;
        self.loading = true;
        self.has_error = false;
        self.version
    }

    /// Apply a response; stale versions are discarded
    pub fn apply(&mut self, version: u64, items: Vec<Capability>, total: usize) -> bool {
        if version != self.version {
            return false;
        }
        self.rows = items;
        self.total = total;
        self.loading = false;
        true
    }

    pub fn failed(&mut self, version: u64) {
        if version != self.version {
            return;
        }
        self.rows.clear();
        self.total = 0;
        self.loading = false;
        self.has_error = true;
    }

    pub fn apply_sort(&mut self, event: &SortEvent) {
        if event.direction == SortDirection::None {
            return;
        }
        self.sort_field = event.column.clone();
        self.sort_direction = event.direction;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.capability_name.clear();
        self.url.clear();
        self.page = 1;
    }

    /// Build the backend query for the current view
    pub fn query(&self) -> CapabilityQuery {
        CapabilityQuery {
            page: self.page,
            page_size: CAPABILITY_PAGE_SIZE,
            sort_field: self.sort_field.clone(),
            sort_type: self.sort_direction.wire_code(),
            search: self.search.clone(),
            url: self.url.clone(),
            capability_name: self.capability_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capability(name: &str) -> Capability {
        Capability {
            capability_id: name.to_lowercase(),
            capability_name: name.to_string(),
            url: format!("/{}", name.to_lowercase()),
        }
    }

    #[test]
    fn test_view_round_trip() {
        let mut state = CapabilitiesState::default();
        state.page = 2;
        state.sort_field = "CapabilityName".to_string();
        state.sort_direction = SortDirection::Desc;
        state.capability_name = "rep".to_string();

        let view = state.view_config();
        let mut restored = CapabilitiesState::default();
        restored.restore_view(&view);
        assert_eq!(restored.page, 2);
        assert_eq!(restored.sort_field, "CapabilityName");
        assert_eq!(restored.sort_direction, SortDirection::Desc);
        assert_eq!(restored.capability_name, "rep");
        assert_eq!(restored.query().sort_type, 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = CapabilitiesState::default();
        let stale = state.begin_load();
        let fresh = state.begin_load();
        assert!(!state.apply(stale, vec![capability("Reports")], 1));
        assert!(state.apply(fresh, vec![capability("Exports")], 1));
        assert_eq!(state.rows[0].capability_name, "Exports");
    }

    #[test]
    fn test_failure_degrades_to_empty() {
        let mut state = CapabilitiesState::default();
        let v = state.begin_load();
        state.apply(v, vec![capability("Reports")], 1);
        let v = state.begin_load();
        state.failed(v);
        assert!(state.rows.is_empty());
        assert!(state.has_error);
    }
}
