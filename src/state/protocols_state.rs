//! ProtocolsState - Protocol and Associated-User State
//!
//! The left-hand protocol list is a lazily-paged catalog; the right-hand
//! user table is page-replace with a version guard so a stale response
//! never overwrites a newer filter/sort/page request.

use ahash::AHashMap;

use crate::components::composite::data_grid::{CellValue, GridRow, SortDirection, SortEvent};
use crate::components::composite::multi_select::catalog::{CatalogItem, SelectionCatalog};
use crate::domain::protocol::Protocol;
use crate::domain::user::AssociatedUser;
use crate::services::api::UserDetailQuery;
use crate::services::debounce::Debouncer;

/// Page size of the protocol list
pub const PROTOCOL_PAGE_SIZE: u32 = 100;
/// Page size of the user table
pub const USER_PAGE_SIZE: u32 = 20;

impl CatalogItem for Protocol {
    fn catalog_id(&self) -> &str {
        &self.protocol_id
    }
}

impl GridRow for AssociatedUser {
    fn cell(&self, key: &str) -> CellValue {
        let value = match key {
            "email" => &self.user_email,
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "role" => &self.user_role,
            "region" => &self.region,
            "country" => &self.country,
            "site" => &self.site,
            "status" => &self.user_status,
            _ => return CellValue::Missing,
        };
        CellValue::Text(value.clone())
    }

    fn apply_edit(&mut self, _values: &AHashMap<String, Vec<String>>) {
        // User rows are not editable inline.
    }
}

/// Column filter values of the user table
#[derive(Debug, Clone, Default)]
pub struct UserFilters {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub site: Option<String>,
    pub status: Option<String>,
}

impl UserFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// State for the Manage Protocols page
pub struct ProtocolsState {
    /// Lazily-paged activated-protocol list
    pub protocols: SelectionCatalog<Protocol>,
    /// Currently selected protocol
    pub selected: Option<Protocol>,
    /// Users of the selected protocol (page-replace)
    pub users: Vec<AssociatedUser>,
    pub total_users: usize,
    users_version: u64,
    pub users_loading: bool,
    pub users_error: bool,
    pub page: u32,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub filters: UserFilters,
    /// Per-protocol filter options, fully replaced on selection change
    pub regions: Vec<String>,
    pub countries: Vec<String>,
    pub sites: Vec<String>,
    /// Debounce for the protocol search box
    pub search_debounce: Debouncer,
}

impl Default for ProtocolsState {
    fn default() -> Self {
        Self {
            protocols: SelectionCatalog::new(PROTOCOL_PAGE_SIZE),
            selected: None,
            users: Vec::new(),
            total_users: 0,
            users_version: 0,
            users_loading: false,
            users_error: false,
            page: 1,
            sort_field: "email".to_string(),
            sort_direction: SortDirection::Asc,
            filters: UserFilters::default(),
            regions: Vec::new(),
            countries: Vec::new(),
            sites: Vec::new(),
            search_debounce: Debouncer::new(),
        }
    }
}

impl ProtocolsState {
    /// Select a protocol: reset filters, page, and per-protocol options
    pub fn select_protocol(&mut self, protocol: Protocol) {
        self.selected = Some(protocol);
        self.filters.clear();
        self.page = 1;
        self.users.clear();
        self.total_users = 0;
        self.regions.clear();
        self.countries.clear();
        self.sites.clear();
    }

    /// Begin a user-table load; returns the version the response must echo
    pub fn begin_users_load(&mut self) -> u64 {
        self.users_version += 1;
        self.users_loading = true;
        self.users_error = false;
        self.users_version
    }

    /// Apply a user-table response; stale versions are discarded
    pub fn apply_users(&mut self, version: u64, items: Vec<AssociatedUser>, total: usize) -> bool {
        if version != self.users_version {
            return false;
        }
        self.users = items;
        self.total_users = total;
        self.users_loading = false;
        true
    }

    /// Record a user-table failure: degrade to an empty list
    pub fn users_failed(&mut self, version: u64) {
        if version != self.users_version {
            return;
        }
        self.users.clear();
        self.total_users = 0;
        self.users_loading = false;
        self.users_error = true;
    }

    /// Apply per-protocol filter options; ignored when the selection has
    /// already moved on
    pub fn apply_filter_options(
        &mut self,
        protocol_id: &str,
        regions: Vec<String>,
        countries: Vec<String>,
        sites: Vec<String>,
    ) {
        if self.selected.as_ref().map(|p| p.protocol_id.as_str()) != Some(protocol_id) {
            return;
        }
        self.regions = regions;
        self.countries = countries;
        self.sites = sites;
    }

    /// Sort change from the grid; direction `None` never reaches here
    pub fn apply_sort(&mut self, event: &SortEvent) {
        if event.direction == SortDirection::None {
            return;
        }
        self.sort_field = event.column.clone();
        self.sort_direction = event.direction;
        self.page = 1;
    }

    /// Build the backend query for the current view
    pub fn user_query(&self) -> UserDetailQuery {
        UserDetailQuery {
            email: self.filters.email.clone(),
            first_name: self.filters.first_name.clone(),
            last_name: self.filters.last_name.clone(),
            role: self.filters.role.clone(),
            region: self.filters.region.clone(),
            country: self.filters.country.clone(),
            site: self.filters.site.clone(),
            status: self.filters.status.clone(),
            search_value: None,
            sort_field: self.sort_field.clone(),
            sort_type: self.sort_direction.wire_code(),
            page_number: self.page,
            page_size: USER_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol(id: &str) -> Protocol {
        Protocol {
            protocol_id: id.to_string(),
            study_code: format!("ST-{id}"),
            ..Default::default()
        }
    }

    fn user(email: &str) -> AssociatedUser {
        AssociatedUser {
            user_email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stale_user_response_is_discarded() {
        let mut state = ProtocolsState::default();
        let stale = state.begin_users_load();
        let fresh = state.begin_users_load();

        assert!(!state.apply_users(stale, vec![user("old@x.com")], 1));
        assert!(state.users.is_empty());

        assert!(state.apply_users(fresh, vec![user("new@x.com")], 1));
        assert_eq!(state.users[0].user_email, "new@x.com");
        assert!(!state.users_loading);
    }

    #[test]
    fn test_select_protocol_resets_view() {
        let mut state = ProtocolsState::default();
        state.filters.role = Some("CRA".to_string());
        state.page = 4;
        state.regions = vec!["EU".to_string()];

        state.select_protocol(protocol("p2"));
        assert!(state.filters.role.is_none());
        assert_eq!(state.page, 1);
        assert!(state.regions.is_empty());
    }

    #[test]
    fn test_filter_options_for_old_protocol_are_ignored() {
        let mut state = ProtocolsState::default();
        state.select_protocol(protocol("p1"));
        state.select_protocol(protocol("p2"));
        state.apply_filter_options("p1", vec!["EU".into()], vec![], vec![]);
        assert!(state.regions.is_empty());
        state.apply_filter_options("p2", vec!["US".into()], vec![], vec![]);
        assert_eq!(state.regions, ["US"]);
    }

    #[test]
    fn test_user_read_failure_degrades_to_empty() {
        let mut state = ProtocolsState::default();
        let v = state.begin_users_load();
        state.apply_users(v, vec![user("a@x.com")], 1);
        let v = state.begin_users_load();
        state.users_failed(v);
        assert!(state.users.is_empty());
        assert!(state.users_error);
    }

    #[test]
    fn test_sort_resets_page() {
        let mut state = ProtocolsState::default();
        state.page = 3;
        state.apply_sort(&SortEvent {
            column: "firstName".to_string(),
            direction: SortDirection::Desc,
        });
        assert_eq!(state.page, 1);
        assert_eq!(state.user_query().sort_type, 1);
    }
}
