//! Selection State for the MultiSelectField
//!
//! Tracks the committed selection (`confirmed`) separately from the
//! working copy (`pending`) mutated while the dropdown is open, plus the
//! "every item" bookkeeping. `all_selected` is derived: it is true iff
//! the confirmed selection covers the dimension's total count, or the
//! consumer supplied the external "All" sentinel — which means "every
//! item, including ones not yet paged in" and keeps auto-selecting newly
//! loaded pages until the user explicitly changes the selection.

use crate::domain::selection::SelectionOption;

/// Id of the synthetic chip shown while every item is selected
pub const ALL_CHIP_ID: &str = "all";

/// Committed selection snapshot emitted through the value-change channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Ids of the committed options
    pub ids: Vec<String>,
    /// Whether the selection covers every item of the dimension
    pub all_selected: bool,
}

/// Per-field selection bookkeeping
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    confirmed: Vec<SelectionOption>,
    pending: Vec<SelectionOption>,
    all_selected: bool,
    pending_all: bool,
    sentinel_all: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmed(&self) -> &[SelectionOption] {
        &self.confirmed
    }

    pub fn pending(&self) -> &[SelectionOption] {
        &self.pending
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn pending_all(&self) -> bool {
        self.pending_all
    }

    /// Whether the working copy has diverged from the committed selection
    pub fn has_pending_changes(&self) -> bool {
        self.pending_all != self.all_selected
            || self.pending.len() != self.confirmed.len()
            || self
                .pending
                .iter()
                .any(|p| !self.confirmed.iter().any(|c| c.id == p.id))
    }

    /// Whether `id` is in the working copy
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.iter().any(|o| o.id == id)
    }

    // ---- external value writes -------------------------------------------

    /// External "All" sentinel: force `all_selected` optimistically,
    /// before any data exists.
    pub fn write_all(&mut self) {
        self.sentinel_all = true;
        self.all_selected = true;
        self.pending_all = true;
    }

    /// Restore a selection from stored ids once options are available
    pub fn write_ids(&mut self, ids: &[String], options: &[SelectionOption]) {
        self.sentinel_all = false;
        self.confirmed = options
            .iter()
            .filter(|o| ids.iter().any(|id| id == &o.id))
            .cloned()
            .collect();
        self.pending = self.confirmed.clone();
        self.all_selected = false;
        self.pending_all = false;
    }

    /// Clear the selection entirely
    pub fn write_none(&mut self) {
        self.sentinel_all = false;
        self.confirmed.clear();
        self.pending.clear();
        self.all_selected = false;
        self.pending_all = false;
    }

    // ---- dropdown lifecycle ----------------------------------------------

    /// Dropdown opened: snapshot the committed selection
    pub fn open(&mut self) {
        self.pending = self.confirmed.clone();
        self.pending_all = self.all_selected;
    }

    /// Flip membership of an option in the working copy (multi mode)
    pub fn toggle(&mut self, option: &SelectionOption, visible: &[SelectionOption]) {
        if let Some(pos) = self.pending.iter().position(|o| o.id == option.id) {
            self.pending.remove(pos);
        } else {
            self.pending.push(option.clone());
        }
        self.pending_all = !visible.is_empty()
            && visible.iter().all(|v| self.is_pending(&v.id));
    }

    /// Header "All" checkbox in the open dropdown
    pub fn toggle_all(&mut self, visible: &[SelectionOption]) {
        if self.pending_all {
            self.pending.clear();
            self.pending_all = false;
        } else {
            self.pending = visible.to_vec();
            self.pending_all = true;
        }
    }

    /// Single-select mode: replace and commit immediately
    pub fn select_single(&mut self, option: &SelectionOption) -> SelectionChange {
        self.sentinel_all = false;
        self.confirmed = vec![option.clone()];
        self.pending = self.confirmed.clone();
        self.all_selected = false;
        self.pending_all = false;
        self.emit()
    }

    /// Commit the working copy and recompute `all_selected`
    pub fn apply(&mut self, total_count: usize) -> SelectionChange {
        self.confirmed = self.pending.clone();
        self.all_selected = self.pending_all;
        if !self.pending_all {
            // The user explicitly changed the selection: the external
            // sentinel no longer stands.
            self.sentinel_all = false;
        }
        self.recompute_all(total_count);
        self.emit()
    }

    /// Discard the working copy
    pub fn cancel(&mut self) {
        self.pending = self.confirmed.clone();
        self.pending_all = self.all_selected;
    }

    /// Remove a chip directly, bypassing open/apply.
    ///
    /// Removing the synthetic "all" chip clears the entire selection,
    /// sentinel included. Returns `None` when the id was not selected.
    pub fn remove_chip(&mut self, id: &str) -> Option<SelectionChange> {
        if id == ALL_CHIP_ID || self.all_selected {
            self.write_none();
            return Some(self.emit());
        }
        let pos = self.confirmed.iter().position(|o| o.id == id)?;
        self.confirmed.remove(pos);
        if let Some(pos) = self.pending.iter().position(|o| o.id == id) {
            self.pending.remove(pos);
        }
        self.all_selected = false;
        self.pending_all = false;
        Some(self.emit())
    }

    // ---- catalog growth ---------------------------------------------------

    /// A new catalog page arrived. While "all" is in force the new items
    /// are auto-selected so "all" stays true — into both buffers normally,
    /// into `pending` only while the dropdown is open with unapplied
    /// changes.
    pub fn absorb_page(&mut self, new_items: &[SelectionOption], mid_edit: bool) {
        let absorb_pending = self.pending_all || self.sentinel_all;
        let absorb_confirmed = (self.all_selected || self.sentinel_all) && !mid_edit;
        if !absorb_pending && !absorb_confirmed {
            return;
        }
        for item in new_items {
            if absorb_pending && !self.pending.iter().any(|o| o.id == item.id) {
                self.pending.push(item.clone());
            }
            if absorb_confirmed && !self.confirmed.iter().any(|o| o.id == item.id) {
                self.confirmed.push(item.clone());
            }
        }
    }

    /// Re-derive `all_selected` against the dimension's total count
    pub fn recompute_all(&mut self, total_count: usize) {
        self.all_selected = self.sentinel_all
            || (total_count > 0 && self.confirmed.len() == total_count);
    }

    /// Chips to render: the synthetic "all" chip while everything is
    /// selected, the confirmed options otherwise.
    pub fn visible_chips(&self, all_options_text: &str) -> Vec<SelectionOption> {
        if self.sentinel_all || (self.all_selected && !self.confirmed.is_empty()) {
            return vec![SelectionOption {
                id: ALL_CHIP_ID.to_string(),
                text: all_options_text.to_string(),
                selected: true,
            }];
        }
        self.confirmed.clone()
    }

    fn emit(&self) -> SelectionChange {
        SelectionChange {
            ids: self.confirmed.iter().map(|o| o.id.clone()).collect(),
            all_selected: self.all_selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(ids: &[&str]) -> Vec<SelectionOption> {
        ids.iter()
            .map(|id| SelectionOption::new(*id, format!("label {id}")))
            .collect()
    }

    #[test]
    fn test_apply_open_cancel_keeps_confirmed() {
        let visible = opts(&["a", "b", "c"]);
        let mut state = SelectionState::new();
        state.open();
        state.toggle(&visible[0], &visible);
        state.toggle(&visible[1], &visible);
        let change = state.apply(3);
        assert_eq!(change.ids, ["a", "b"]);

        state.open();
        state.toggle(&visible[2], &visible);
        state.cancel();
        let ids: Vec<&str> = state.confirmed().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(!state.has_pending_changes());
    }

    #[test]
    fn test_all_selected_derived_from_total() {
        let visible = opts(&["a", "b"]);
        let mut state = SelectionState::new();
        state.open();
        state.toggle(&visible[0], &visible);
        state.toggle(&visible[1], &visible);
        assert!(state.pending_all());
        let change = state.apply(2);
        assert!(change.all_selected);
        // One more item exists server-side: no longer "all".
        state.recompute_all(3);
        assert!(!state.all_selected());
    }

    #[test]
    fn test_sentinel_before_data_then_pages_auto_select() {
        let mut state = SelectionState::new();
        state.write_all();
        assert!(state.all_selected());
        assert!(state.confirmed().is_empty());

        state.absorb_page(&opts(&["a", "b"]), false);
        assert_eq!(state.confirmed().len(), 2);
        assert_eq!(state.pending().len(), 2);
        state.recompute_all(2);
        assert!(state.all_selected());
    }

    #[test]
    fn test_growth_mid_edit_only_touches_pending() {
        let visible = opts(&["a", "b"]);
        let mut state = SelectionState::new();
        state.open();
        state.toggle_all(&visible);
        state.apply(2);
        assert!(state.all_selected());

        // Dropdown reopened, user toggles something: mid-edit.
        state.open();
        state.absorb_page(&opts(&["c"]), true);
        assert_eq!(state.pending().len(), 3);
        assert_eq!(state.confirmed().len(), 2);
    }

    #[test]
    fn test_remove_all_chip_clears_everything() {
        let mut state = SelectionState::new();
        state.write_all();
        state.absorb_page(&opts(&["a", "b"]), false);

        let change = state.remove_chip(ALL_CHIP_ID).expect("removal emits");
        assert!(change.ids.is_empty());
        assert!(!change.all_selected);
        assert!(state.confirmed().is_empty());
        assert!(state.pending().is_empty());
        assert!(!state.all_selected());
        // The sentinel is gone: later pages are no longer auto-selected.
        state.absorb_page(&opts(&["c"]), false);
        assert!(state.confirmed().is_empty());
    }

    #[test]
    fn test_remove_single_chip_updates_both_buffers() {
        let visible = opts(&["a", "b", "c"]);
        let mut state = SelectionState::new();
        state.open();
        state.toggle(&visible[0], &visible);
        state.toggle(&visible[1], &visible);
        state.apply(3);

        let change = state.remove_chip("a").expect("removal emits");
        assert_eq!(change.ids, ["b"]);
        assert!(!state.is_pending("a"));
        assert!(state.remove_chip("zzz").is_none());
    }

    #[test]
    fn test_single_select_commits_immediately() {
        let visible = opts(&["a", "b"]);
        let mut state = SelectionState::new();
        let change = state.select_single(&visible[1]);
        assert_eq!(change.ids, ["b"]);
        let change = state.select_single(&visible[0]);
        assert_eq!(change.ids, ["a"]);
        assert_eq!(state.confirmed().len(), 1);
    }

    #[test]
    fn test_apply_without_all_clears_sentinel() {
        let visible = opts(&["a", "b"]);
        let mut state = SelectionState::new();
        state.write_all();
        state.absorb_page(&visible, false);
        state.open();
        state.toggle(&visible[0], &visible); // uncheck "a"
        state.apply(2);
        assert!(!state.all_selected());
        state.absorb_page(&opts(&["c"]), false);
        // Sentinel cleared: no auto-selection of later pages.
        assert_eq!(state.confirmed().len(), 1);
    }

    #[test]
    fn test_visible_chips_collapse_to_all() {
        let visible = opts(&["a", "b"]);
        let mut state = SelectionState::new();
        state.open();
        state.toggle_all(&visible);
        state.apply(2);
        let chips = state.visible_chips("All Tests");
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].id, ALL_CHIP_ID);
        assert_eq!(chips[0].text, "All Tests");
    }
}
