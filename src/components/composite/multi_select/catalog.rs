//! SelectionCatalog - Lazily-Paged, Searchable Option Source
//!
//! A catalog is an append-only view over a remote collection, filled in
//! page by page while the user scrolls, and invalidated wholesale when the
//! search term or the parent selection changes. Every invalidation bumps a
//! version counter; responses carry the version of the request that
//! produced them and are discarded on mismatch, so a stale response can
//! never overwrite a newer search.
//!
//! The generic parameter lets the same bookkeeping back both option
//! dropdowns (`SelectionOption` items) and the lazily-paged entity lists
//! (protocols, profiles).

use crate::domain::selection::SelectionOption;

/// Default page size for dropdown catalogs
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// An item that can live in a catalog
pub trait CatalogItem: Clone {
    /// Stable unique id within one catalog snapshot
    fn catalog_id(&self) -> &str;
}

impl CatalogItem for SelectionOption {
    fn catalog_id(&self) -> &str {
        &self.id
    }
}

/// A page request produced by the catalog, to be executed by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Version the response must echo to be applied
    pub version: u64,
    /// 1-based page to fetch
    pub page: u32,
    pub page_size: u32,
    /// Search term active when the request was issued
    pub search: String,
}

/// Paged catalog state for one filterable dimension
#[derive(Debug, Clone)]
pub struct SelectionCatalog<T: CatalogItem = SelectionOption> {
    items: Vec<T>,
    total_count: usize,
    page: u32,
    page_size: u32,
    search_term: String,
    version: u64,
    loading: bool,
    has_error: bool,
    /// Whether at least one page has been applied since the last reset
    primed: bool,
}

impl<T: CatalogItem> SelectionCatalog<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 0,
            page_size: page_size.max(1),
            search_term: String::new(),
            version: 0,
            loading: false,
            has_error: false,
            primed: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fully loaded once every known item has been paged in
    pub fn is_fully_loaded(&self) -> bool {
        self.primed && self.items.len() >= self.total_count
    }

    /// Build the request for the next page.
    ///
    /// No-op (returns `None`) while a request is in flight or once the
    /// catalog is fully loaded. Marks the catalog loading otherwise.
    pub fn next_page_request(&mut self) -> Option<CatalogRequest> {
        if self.loading || self.is_fully_loaded() {
            return None;
        }
        self.loading = true;
        Some(CatalogRequest {
            version: self.version,
            page: self.page + 1,
            page_size: self.page_size,
            search: self.search_term.clone(),
        })
    }

    /// Apply a fetched page. Stale responses (version mismatch) are
    /// discarded without touching any state.
    pub fn apply_page(&mut self, version: u64, items: Vec<T>, total_count: usize) {
        if version != self.version {
            return;
        }
        self.loading = false;
        self.has_error = false;
        self.primed = true;
        self.page += 1;
        self.total_count = total_count;
        // Dedup against already-paged ids; the server may shift pages
        // while rows are inserted upstream.
        for item in items {
            if !self.items.iter().any(|i| i.catalog_id() == item.catalog_id()) {
                self.items.push(item);
            }
        }
    }

    /// Record a failed page fetch: keep last-good items, surface the error
    pub fn apply_error(&mut self, version: u64) {
        if version != self.version {
            return;
        }
        self.loading = false;
        self.has_error = true;
    }

    /// Change the search term. Returns `true` when the term actually
    /// changed, in which case items are invalidated and the caller must
    /// schedule a (debounced) reload.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        if term == self.search_term {
            return false;
        }
        self.search_term = term.to_string();
        self.invalidate();
        true
    }

    /// Clear everything, e.g. when the parent selection changes
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.items.clear();
        self.total_count = 0;
        self.page = 0;
        self.loading = false;
        self.has_error = false;
        self.primed = false;
        self.version += 1;
    }
}

impl<T: CatalogItem> Default for SelectionCatalog<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: &str) -> SelectionOption {
        SelectionOption::new(id, format!("label {id}"))
    }

    #[test]
    fn test_pages_append_in_order() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        let req = catalog.next_page_request().expect("first request");
        assert_eq!(req.page, 1);
        catalog.apply_page(req.version, vec![opt("a"), opt("b")], 3);
        assert_eq!(catalog.items().len(), 2);
        assert!(!catalog.is_fully_loaded());

        let req = catalog.next_page_request().expect("second request");
        assert_eq!(req.page, 2);
        catalog.apply_page(req.version, vec![opt("c")], 3);
        assert!(catalog.is_fully_loaded());
        assert!(catalog.next_page_request().is_none());
    }

    #[test]
    fn test_no_concurrent_requests() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        assert!(catalog.next_page_request().is_some());
        // Already loading: no second request until the first resolves.
        assert!(catalog.next_page_request().is_none());
    }

    #[test]
    fn test_superseded_search_response_is_discarded() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        catalog.set_search_term("x");
        let stale = catalog.next_page_request().expect("request for x");
        // A newer search supersedes the in-flight request.
        catalog.set_search_term("y");
        let fresh = catalog.next_page_request().expect("request for y");

        catalog.apply_page(stale.version, vec![opt("from-x")], 1);
        assert!(catalog.is_empty());

        catalog.apply_page(fresh.version, vec![opt("from-y")], 1);
        assert_eq!(catalog.items()[0].id, "from-y");
    }

    #[test]
    fn test_unchanged_search_term_is_a_noop() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        let v = catalog.version();
        assert!(catalog.set_search_term("abc"));
        assert!(!catalog.set_search_term("abc"));
        assert_eq!(catalog.version(), v + 1);
    }

    #[test]
    fn test_error_keeps_last_good_items() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        let req = catalog.next_page_request().expect("request");
        catalog.apply_page(req.version, vec![opt("a"), opt("b")], 4);

        let req = catalog.next_page_request().expect("request");
        catalog.apply_error(req.version);
        assert!(catalog.has_error());
        assert_eq!(catalog.items().len(), 2);
        // The consumer decides whether to retry; the catalog allows it.
        assert!(catalog.next_page_request().is_some());
    }

    #[test]
    fn test_reset_invalidates_in_flight_responses() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        let req = catalog.next_page_request().expect("request");
        catalog.reset();
        catalog.apply_page(req.version, vec![opt("late")], 1);
        assert!(catalog.is_empty());
        assert!(!catalog.is_loading());
    }

    #[test]
    fn test_duplicate_ids_are_not_appended_twice() {
        let mut catalog: SelectionCatalog = SelectionCatalog::new(2);
        let req = catalog.next_page_request().expect("request");
        catalog.apply_page(req.version, vec![opt("a"), opt("b")], 4);
        let req = catalog.next_page_request().expect("request");
        catalog.apply_page(req.version, vec![opt("b"), opt("c")], 4);
        let ids: Vec<&str> = catalog.items().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
