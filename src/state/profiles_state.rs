//! ProfilesState - Report Profile and Blind/Hide Configuration State
//!
//! Owns the protocol dropdown catalog, the lazily-paged profile list, the
//! per-profile filter option sets, the blind/hide detail table, and the
//! cohort-test mapping used to validate edited test selections. Detail
//! rows are projected into [`ProfileRow`]s carrying both the structured
//! setting and its flat `id@version` edit values; the two representations
//! are re-derived from each other on every save so they cannot drift.

use ahash::{AHashMap, AHashSet};

use crate::components::composite::data_grid::{
    CellValue, ColumnOptions, GridRow, SortDirection, SortEvent,
};
use crate::components::composite::multi_select::catalog::{CatalogItem, SelectionCatalog};
use crate::domain::profile::{
    BlindOrHide, CohortRef, Profile, ProfileSetting, TestRef, VisitRef,
};
use crate::domain::selection::{SelectionOption, VersionedId};
use crate::services::api::{
    CohortFilterRef, CohortTests, ProfileDetailQuery, ProfileFilterOptions, TestFilterRef,
    UpdateProfileSettingRequest, VisitFilterRef,
};
use crate::services::debounce::Debouncer;

/// Page size of the lazy profile list
pub const PROFILE_PAGE_SIZE: u32 = 40;
/// Page size of the detail table
pub const DETAIL_PAGE_SIZE: u32 = 20;

impl CatalogItem for Profile {
    fn catalog_id(&self) -> &str {
        &self.profile_id
    }
}

// ---- detail row projection -------------------------------------------------

/// One blind/hide setting row, as the grid sees it: the structured
/// setting plus flat edit values keyed the way the columns expect them.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub setting: ProfileSetting,
    /// `studyTestId@versionNumber` per selected test
    pub tests_values: Vec<String>,
    /// Single-element `cohortId@versionNumber`
    pub cohort_value: Vec<String>,
    /// `visitId@versionNumber` per selected visit
    pub visits_values: Vec<String>,
    /// Single-element display label ("Blind" / "Hide")
    pub blind_value: Vec<String>,
}

impl ProfileRow {
    /// Project a raw setting into its flat edit values. The cohort's
    /// version number is recovered from the cohort option catalog.
    pub fn from_setting(setting: ProfileSetting, cohort_options: &[SelectionOption]) -> Self {
        let tests_values = setting
            .tests
            .iter()
            .map(|t| VersionedId::key(&t.study_test_id, t.version_number))
            .collect();
        let visits_values = setting
            .visits
            .iter()
            .map(|v| VersionedId::key(&v.visit_id, v.version_number))
            .collect();
        let cohort_value = cohort_options
            .iter()
            .find(|opt| {
                VersionedId::parse(&opt.id)
                    .map(|v| v.id == setting.cohort_id)
                    .unwrap_or(false)
            })
            .map(|opt| vec![opt.id.clone()])
            .unwrap_or_default();
        let blind_value = vec![setting.blind_or_hide.label().to_string()];
        Self {
            setting,
            tests_values,
            cohort_value,
            visits_values,
            blind_value,
        }
    }

    /// Rebuild the structured setting from the flat edit values, looking
    /// labels up against the option catalogs.
    pub fn rehydrate(
        &mut self,
        test_options: &[SelectionOption],
        cohort_options: &[SelectionOption],
        visit_options: &[SelectionOption],
    ) {
        self.setting.tests = self
            .tests_values
            .iter()
            .filter_map(|raw| {
                let versioned = VersionedId::parse(raw)?;
                let name = test_options
                    .iter()
                    .find(|opt| opt.id == *raw)
                    .map(|opt| opt.text.clone())
                    .unwrap_or_default();
                Some(TestRef {
                    study_test_id: versioned.id,
                    test_name: name,
                    version_number: versioned.version,
                })
            })
            .collect();

        self.setting.visits = self
            .visits_values
            .iter()
            .filter_map(|raw| {
                let versioned = VersionedId::parse(raw)?;
                let name = visit_options
                    .iter()
                    .find(|opt| opt.id == *raw)
                    .map(|opt| opt.text.clone())
                    .unwrap_or_default();
                Some(VisitRef {
                    visit_id: versioned.id,
                    visit_name: name,
                    version_number: versioned.version,
                })
            })
            .collect();

        if let Some(raw) = self.cohort_value.first() {
            if let Some(versioned) = VersionedId::parse(raw) {
                self.setting.cohort_id = versioned.id;
            }
            self.setting.cohort_name = cohort_options
                .iter()
                .find(|opt| &opt.id == raw)
                .map(|opt| opt.text.clone())
                .unwrap_or_else(|| self.setting.cohort_name.clone());
        }

        if let Some(label) = self.blind_value.first() {
            if let Some(parsed) = BlindOrHide::parse(label) {
                self.setting.blind_or_hide = parsed;
            }
        }
    }

    /// Build the update payload for this row
    pub fn update_request(&self, profile_id: &str) -> UpdateProfileSettingRequest {
        UpdateProfileSettingRequest {
            profile_id: profile_id.to_string(),
            test_ids: self
                .setting
                .tests
                .iter()
                .map(|t| t.study_test_id.clone())
                .collect(),
            cohort_id: self.setting.cohort_id.clone(),
            visit_ids: self
                .setting
                .visits
                .iter()
                .map(|v| v.visit_id.clone())
                .collect(),
            blind_or_hide: self.setting.blind_or_hide.code().to_string(),
        }
    }
}

impl GridRow for ProfileRow {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            // Display cells carry ids; labels resolve through the
            // column's reference options at render time.
            "testsDisplay" | "testsValues" => CellValue::List(self.tests_values.clone()),
            "visitsDisplay" | "visitsValues" => CellValue::List(self.visits_values.clone()),
            "cohortName" => CellValue::Text(self.setting.cohort_name.clone()),
            "cohortValue" => CellValue::List(self.cohort_value.clone()),
            "blindOrHide" => CellValue::Text(self.setting.blind_or_hide.label().to_string()),
            _ => CellValue::Missing,
        }
    }

    fn apply_edit(&mut self, values: &AHashMap<String, Vec<String>>) {
        if let Some(tests) = values.get("testsValues") {
            self.tests_values = tests.clone();
        }
        if let Some(cohort) = values.get("cohortValue") {
            self.cohort_value = cohort.clone();
        }
        if let Some(visits) = values.get("visitsValues") {
            self.visits_values = visits.clone();
        }
        if let Some(blind) = values.get("blindOrHide") {
            self.blind_value = blind.clone();
        }
    }

    fn row_key(&self) -> Option<String> {
        Some(self.setting.profile_setting_id.clone())
    }
}

// ---- cohort-test validation ------------------------------------------------

/// Outcome of checking edited test selections against the cohort mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CohortCheck {
    /// Nothing selected: nothing to validate
    Empty,
    /// All selected tests belong to this cohort
    Single(String),
    /// Selected tests span more than one cohort
    Conflict,
}

// ---- page state ------------------------------------------------------------

/// State for the Manage Profiles page
pub struct ProfilesState {
    /// Selected protocol: (protocol_id, study_code)
    pub selected_protocol: Option<(String, String)>,
    /// Lazily-paged report profile list of the selected protocol
    pub profiles: SelectionCatalog<Profile>,
    pub selected_profile: Option<Profile>,
    /// Profiles ticked in the list for bulk removal
    pub checked_profiles: AHashSet<String>,

    /// Filter option sets, fully replaced per protocol/profile
    pub test_options: Vec<SelectionOption>,
    pub cohort_options: Vec<SelectionOption>,
    pub visit_options: Vec<SelectionOption>,
    pub study_id: Option<String>,
    filters_version: u64,

    /// Active detail filters (ids in `id@version` form)
    pub filter_tests: Vec<String>,
    pub filter_cohorts: Vec<String>,
    pub filter_visits: Vec<String>,
    pub filter_blind: Option<BlindOrHide>,
    pub search_text: String,

    /// Detail table (page-replace with version guard)
    pub rows: Vec<ProfileRow>,
    pub total_rows: usize,
    detail_version: u64,
    pub detail_loading: bool,
    pub detail_error: bool,
    /// Set when a mutation landed and the table must be refetched
    pub detail_stale: bool,
    /// Set when the filter option sets must be reloaded
    pub filters_stale: bool,
    /// Set when the cohort-test mapping must be reloaded
    pub cohort_tests_stale: bool,
    /// Set when the profile list must be reloaded from page 1
    pub profiles_stale: bool,

    pub page: u32,
    pub sort_field: String,
    pub sort_direction: SortDirection,

    /// cohortId -> tests (`id@version`) of the selected profile
    pub cohort_tests: AHashMap<String, Vec<String>>,

    pub protocol_search_debounce: Debouncer,
    pub profile_search_debounce: Debouncer,
    pub detail_search_debounce: Debouncer,
}

impl Default for ProfilesState {
    fn default() -> Self {
        Self {
            selected_protocol: None,
            profiles: SelectionCatalog::new(PROFILE_PAGE_SIZE),
            selected_profile: None,
            checked_profiles: AHashSet::new(),
            test_options: Vec::new(),
            cohort_options: Vec::new(),
            visit_options: Vec::new(),
            study_id: None,
            filters_version: 0,
            filter_tests: Vec::new(),
            filter_cohorts: Vec::new(),
            filter_visits: Vec::new(),
            filter_blind: None,
            search_text: String::new(),
            rows: Vec::new(),
            total_rows: 0,
            detail_version: 0,
            detail_loading: false,
            detail_error: false,
            detail_stale: false,
            filters_stale: false,
            cohort_tests_stale: false,
            profiles_stale: false,
            page: 1,
            sort_field: "Tests".to_string(),
            sort_direction: SortDirection::Asc,
            cohort_tests: AHashMap::new(),
            protocol_search_debounce: Debouncer::new(),
            profile_search_debounce: Debouncer::new(),
            detail_search_debounce: Debouncer::new(),
        }
    }
}

impl ProfilesState {
    /// Select a protocol: everything scoped to the previous protocol is
    /// replaced, never merged.
    pub fn select_protocol(&mut self, protocol_id: String, study_code: String) {
        self.selected_protocol = Some((protocol_id, study_code));
        self.selected_profile = None;
        self.profiles.reset();
        self.checked_profiles.clear();
        self.test_options.clear();
        self.cohort_options.clear();
        self.visit_options.clear();
        self.cohort_tests.clear();
        self.clear_filters();
        self.rows.clear();
        self.total_rows = 0;
        self.page = 1;
    }

    /// Select a profile within the protocol
    pub fn select_profile(&mut self, profile: Profile) {
        self.selected_profile = Some(profile);
        self.page = 1;
        self.cohort_tests.clear();
    }

    /// Pick the protocol's default profile after the first page loads.
    /// Returns whether a profile was adopted.
    pub fn adopt_default_profile(&mut self) -> bool {
        if self.selected_profile.is_some() {
            return false;
        }
        self.selected_profile = self
            .profiles
            .items()
            .iter()
            .find(|p| p.is_default)
            .cloned();
        self.selected_profile.is_some()
    }

    pub fn toggle_profile_checked(&mut self, profile_id: &str) {
        if !self.checked_profiles.remove(profile_id) {
            self.checked_profiles.insert(profile_id.to_string());
        }
    }

    pub fn is_profile_checked(&self, profile_id: &str) -> bool {
        self.checked_profiles.contains(profile_id)
    }

    /// Display names of the checked profiles, for confirmation text
    pub fn checked_profile_names(&self) -> Vec<String> {
        self.profiles
            .items()
            .iter()
            .filter(|p| self.checked_profiles.contains(&p.profile_id))
            .map(|p| p.profile_name.clone())
            .collect()
    }

    // ---- filter options ---------------------------------------------------

    /// Begin a filter-options load; the response must echo the version
    pub fn begin_filters_load(&mut self) -> u64 {
        self.filters_version += 1;
        self.filters_version
    }

    /// Apply filter options (full replacement); stale versions discarded
    pub fn apply_filter_options(&mut self, version: u64, options: ProfileFilterOptions) -> bool {
        if version != self.filters_version {
            return false;
        }
        if let Some(study_id) = options.study_id {
            self.study_id = Some(study_id);
        }
        self.test_options = options.tests.iter().map(test_option).collect();
        self.cohort_options = options.cohorts.iter().map(cohort_option).collect();
        self.visit_options = options.visits.iter().map(visit_option).collect();
        true
    }

    /// Reference/edit options per grid column key
    pub fn edit_options(&self) -> ColumnOptions {
        ColumnOptions::from_iter([
            ("testsDisplay".to_string(), self.test_options.clone()),
            ("cohortName".to_string(), self.cohort_options.clone()),
            ("visitsDisplay".to_string(), self.visit_options.clone()),
            ("blindOrHide".to_string(), blind_or_hide_options()),
        ])
    }

    // ---- detail table -----------------------------------------------------

    /// Begin a detail load; returns the version the response must echo
    pub fn begin_detail_load(&mut self) -> u64 {
        self.detail_version += 1;
        self.detail_loading = true;
        self.detail_error = false;
        self.detail_version
    }

    /// Apply a detail page; rows are projected against the cohort options
    pub fn apply_detail(&mut self, version: u64, items: Vec<ProfileSetting>, total: usize) -> bool {
        if version != self.detail_version {
            return false;
        }
        self.rows = items
            .into_iter()
            .map(|s| ProfileRow::from_setting(s, &self.cohort_options))
            .collect();
        self.total_rows = total;
        self.detail_loading = false;
        self.detail_stale = false;
        true
    }

    pub fn detail_failed(&mut self, version: u64) {
        if version != self.detail_version {
            return;
        }
        self.rows.clear();
        self.total_rows = 0;
        self.detail_loading = false;
        self.detail_error = true;
    }

    /// A mutation landed: the table must be refetched
    pub fn mark_detail_stale(&mut self) {
        self.detail_stale = true;
        self.page = 1;
    }

    /// Sort change from the grid
    pub fn apply_sort(&mut self, event: &SortEvent) {
        if event.direction == SortDirection::None {
            return;
        }
        self.sort_field = event.column.clone();
        self.sort_direction = event.direction;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filter_tests.clear();
        self.filter_cohorts.clear();
        self.filter_visits.clear();
        self.filter_blind = None;
        self.search_text.clear();
    }

    /// Build the detail query for the current view
    pub fn detail_query(&self) -> Option<ProfileDetailQuery> {
        let (protocol_id, _) = self.selected_protocol.as_ref()?;
        Some(ProfileDetailQuery {
            study_id: self.study_id.clone().unwrap_or_else(|| protocol_id.clone()),
            profile_id: self.selected_profile.as_ref().map(|p| p.profile_id.clone()),
            study_test_ids: versioned_refs(&self.filter_tests, |v| TestFilterRef {
                study_test_id: v.id,
                version_number: v.version,
            }),
            cohort_ids: versioned_refs(&self.filter_cohorts, |v| CohortFilterRef {
                cohort_id: v.id,
                version_number: v.version,
            }),
            visit_ids: versioned_refs(&self.filter_visits, |v| VisitFilterRef {
                visit_id: v.id,
                version_number: v.version,
            }),
            blind_or_hide: self.filter_blind.map(|b| b.code().to_string()),
            search_value: self.search_text.clone(),
            sort_field: self.sort_field.clone(),
            sort_direction: self.sort_direction.wire_code(),
            current_page: self.page,
            page_size: DETAIL_PAGE_SIZE,
        })
    }

    // ---- cohort-test validation ------------------------------------------

    /// Replace the cohort-test mapping of the selected profile
    pub fn set_cohort_tests(&mut self, profile_id: &str, cohorts: Vec<CohortTests>) {
        if self.selected_profile.as_ref().map(|p| p.profile_id.as_str()) != Some(profile_id) {
            return;
        }
        self.cohort_tests = cohorts
            .into_iter()
            .map(|c| {
                let tests = c
                    .tests
                    .iter()
                    .map(|t| VersionedId::key(&t.study_test_id, t.version_number))
                    .collect();
                (c.cohort_id, tests)
            })
            .collect();
    }

    /// Check whether the selected tests all belong to one cohort
    pub fn check_tests_cohort(&self, selected_test_ids: &[String]) -> CohortCheck {
        if selected_test_ids.is_empty() {
            return CohortCheck::Empty;
        }
        let mut cohorts: Vec<&str> = Vec::new();
        for (cohort_id, tests) in &self.cohort_tests {
            if selected_test_ids.iter().any(|id| tests.contains(id))
                && !cohorts.contains(&cohort_id.as_str())
            {
                cohorts.push(cohort_id);
            }
        }
        match cohorts.as_slice() {
            [single] => CohortCheck::Single((*single).to_string()),
            [] => CohortCheck::Empty,
            _ => CohortCheck::Conflict,
        }
    }
}

fn versioned_refs<T>(ids: &[String], build: impl Fn(VersionedId) -> T) -> Option<Vec<T>> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .filter_map(|raw| VersionedId::parse(raw))
            .map(build)
            .collect(),
    )
}

fn test_option(test: &TestRef) -> SelectionOption {
    SelectionOption::new(
        VersionedId::key(&test.study_test_id, test.version_number),
        test.test_name.clone(),
    )
}

fn cohort_option(cohort: &CohortRef) -> SelectionOption {
    SelectionOption::new(
        VersionedId::key(&cohort.cohort_id, cohort.version_number),
        cohort.cohort_name.clone(),
    )
}

fn visit_option(visit: &VisitRef) -> SelectionOption {
    SelectionOption::new(
        VersionedId::key(&visit.visit_id, visit.version_number),
        visit.visit_name.clone(),
    )
}

/// Static Blind/Hide options
pub fn blind_or_hide_options() -> Vec<SelectionOption> {
    vec![
        SelectionOption::new("Blind", "Blind"),
        SelectionOption::new("Hide", "Hide"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting() -> ProfileSetting {
        ProfileSetting {
            profile_setting_id: "ps-1".to_string(),
            tests: vec![TestRef {
                study_test_id: "T1".to_string(),
                test_name: "ALT".to_string(),
                version_number: 2,
            }],
            cohort_id: "C1".to_string(),
            cohort_name: "Cohort A".to_string(),
            visits: vec![VisitRef {
                visit_id: "V1".to_string(),
                visit_name: "Baseline".to_string(),
                version_number: 1,
            }],
            blind_or_hide: BlindOrHide::Blind,
        }
    }

    fn cohort_opts() -> Vec<SelectionOption> {
        vec![SelectionOption::new("C1@3", "Cohort A")]
    }

    fn test_opts() -> Vec<SelectionOption> {
        vec![
            SelectionOption::new("T1@2", "ALT"),
            SelectionOption::new("T2@1", "AST"),
        ]
    }

    fn visit_opts() -> Vec<SelectionOption> {
        vec![
            SelectionOption::new("V1@1", "Baseline"),
            SelectionOption::new("V2@1", "Week 4"),
        ]
    }

    #[test]
    fn test_row_projection_flattens_versioned_ids() {
        let row = ProfileRow::from_setting(setting(), &cohort_opts());
        assert_eq!(row.tests_values, ["T1@2"]);
        assert_eq!(row.visits_values, ["V1@1"]);
        // Cohort version recovered from the option catalog.
        assert_eq!(row.cohort_value, ["C1@3"]);
        assert_eq!(row.blind_value, ["Blind"]);
    }

    #[test]
    fn test_rehydrate_rebuilds_structured_values() {
        let mut row = ProfileRow::from_setting(setting(), &cohort_opts());
        row.tests_values = vec!["T1@2".to_string(), "T2@1".to_string()];
        row.blind_value = vec!["Hide".to_string()];
        row.rehydrate(&test_opts(), &cohort_opts(), &visit_opts());

        assert_eq!(row.setting.tests.len(), 2);
        assert_eq!(row.setting.tests[1].study_test_id, "T2");
        assert_eq!(row.setting.tests[1].version_number, 1);
        assert_eq!(row.setting.tests[1].test_name, "AST");
        assert_eq!(row.setting.blind_or_hide, BlindOrHide::Hide);

        let request = row.update_request("profile-9");
        assert_eq!(request.test_ids, ["T1", "T2"]);
        assert_eq!(request.blind_or_hide, "H");
    }

    #[test]
    fn test_grid_cells_expose_ids_under_display_and_value_keys() {
        let row = ProfileRow::from_setting(setting(), &cohort_opts());
        assert_eq!(
            row.cell("testsDisplay"),
            CellValue::List(vec!["T1@2".to_string()])
        );
        assert_eq!(
            row.cell("testsValues"),
            CellValue::List(vec!["T1@2".to_string()])
        );
        assert_eq!(row.cell("cohortName"), CellValue::Text("Cohort A".to_string()));
        assert_eq!(row.cell("blindOrHide"), CellValue::Text("Blind".to_string()));
        assert_eq!(row.row_key().as_deref(), Some("ps-1"));
    }

    #[test]
    fn test_stale_detail_response_is_discarded() {
        let mut state = ProfilesState::default();
        let stale = state.begin_detail_load();
        let fresh = state.begin_detail_load();
        assert!(!state.apply_detail(stale, vec![setting()], 1));
        assert!(state.rows.is_empty());
        assert!(state.apply_detail(fresh, vec![setting()], 1));
        assert_eq!(state.rows.len(), 1);
    }

    #[test]
    fn test_select_protocol_replaces_scoped_state() {
        let mut state = ProfilesState::default();
        state.test_options = test_opts();
        state.filter_tests = vec!["T1@2".to_string()];
        state.cohort_tests.insert("C1".to_string(), vec![]);
        state.page = 5;

        state.select_protocol("p2".to_string(), "ST-2".to_string());
        assert!(state.test_options.is_empty());
        assert!(state.filter_tests.is_empty());
        assert!(state.cohort_tests.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_filter_options_version_guard() {
        let mut state = ProfilesState::default();
        let stale = state.begin_filters_load();
        let fresh = state.begin_filters_load();
        let options = ProfileFilterOptions {
            study_id: Some("S1".to_string()),
            tests: vec![TestRef {
                study_test_id: "T1".to_string(),
                test_name: "ALT".to_string(),
                version_number: 2,
            }],
            cohorts: vec![],
            visits: vec![],
        };
        assert!(!state.apply_filter_options(stale, options.clone()));
        assert!(state.test_options.is_empty());
        assert!(state.apply_filter_options(fresh, options));
        assert_eq!(state.test_options[0].id, "T1@2");
        assert_eq!(state.test_options[0].text, "ALT");
    }

    #[test]
    fn test_detail_query_carries_versioned_filter_refs() {
        let mut state = ProfilesState::default();
        state.select_protocol("p1".to_string(), "ST-1".to_string());
        state.study_id = Some("S1".to_string());
        state.filter_tests = vec!["T1@2".to_string()];
        state.filter_blind = Some(BlindOrHide::Hide);

        let query = state.detail_query().expect("query");
        assert_eq!(query.study_id, "S1");
        let tests = query.study_test_ids.expect("tests");
        assert_eq!(tests[0].study_test_id, "T1");
        assert_eq!(tests[0].version_number, 2);
        assert!(query.cohort_ids.is_none());
        assert_eq!(query.blind_or_hide.as_deref(), Some("H"));
        assert_eq!(query.sort_field, "Tests");
        assert_eq!(query.sort_direction, 2);
    }

    #[test]
    fn test_cohort_check() {
        let mut state = ProfilesState::default();
        state.selected_profile = Some(Profile {
            profile_id: "pr-1".to_string(),
            ..Default::default()
        });
        state.set_cohort_tests(
            "pr-1",
            vec![
                CohortTests {
                    cohort_id: "C1".to_string(),
                    tests: vec![TestRef {
                        study_test_id: "T1".to_string(),
                        test_name: String::new(),
                        version_number: 2,
                    }],
                },
                CohortTests {
                    cohort_id: "C2".to_string(),
                    tests: vec![TestRef {
                        study_test_id: "T2".to_string(),
                        test_name: String::new(),
                        version_number: 1,
                    }],
                },
            ],
        );

        assert_eq!(state.check_tests_cohort(&[]), CohortCheck::Empty);
        assert_eq!(
            state.check_tests_cohort(&["T1@2".to_string()]),
            CohortCheck::Single("C1".to_string())
        );
        assert_eq!(
            state.check_tests_cohort(&["T1@2".to_string(), "T2@1".to_string()]),
            CohortCheck::Conflict
        );
    }

    #[test]
    fn test_cohort_tests_for_other_profile_are_ignored() {
        let mut state = ProfilesState::default();
        state.selected_profile = Some(Profile {
            profile_id: "pr-1".to_string(),
            ..Default::default()
        });
        state.set_cohort_tests("pr-9", vec![]);
        assert!(state.cohort_tests.is_empty());
    }

    #[test]
    fn test_adopt_default_profile() {
        let mut state = ProfilesState::default();
        let request = state.profiles.next_page_request().expect("request");
        state.profiles.apply_page(
            request.version,
            vec![
                Profile {
                    profile_id: "a".to_string(),
                    profile_name: "A".to_string(),
                    is_default: false,
                    ..Default::default()
                },
                Profile {
                    profile_id: "b".to_string(),
                    profile_name: "B".to_string(),
                    is_default: true,
                    ..Default::default()
                },
            ],
            2,
        );
        state.adopt_default_profile();
        assert_eq!(
            state.selected_profile.as_ref().map(|p| p.profile_id.as_str()),
            Some("b")
        );
    }
}
