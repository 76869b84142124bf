//! Row Checkbox Selection with Exception-Set Encoding
//!
//! The header checkbox toggles between bulk states; individual rows that
//! deviate from the bulk state are tracked in an exception set rather than
//! storing a flag per row. With server-side pagination the row count can
//! reach thousands, so only the deviations are kept. Rows are identified
//! either by a unique key (when the grid has one configured) or by index.

use ahash::AHashSet;

/// Aggregate checkbox state of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckboxState {
    #[default]
    AllUnchecked,
    AllChecked,
    /// Base unchecked, exception set holds the checked rows
    SomeChecked,
    /// Base checked, exception set holds the unchecked rows
    SomeUnchecked,
}

impl CheckboxState {
    /// Whether the base state counts rows as checked
    fn base_checked(&self) -> bool {
        matches!(self, CheckboxState::AllChecked | CheckboxState::SomeUnchecked)
    }
}

/// Whether a change came from a single row or the header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxChangeKind {
    Single,
    All,
}

/// Change notification emitted on every selection mutation.
///
/// Exactly one of `exception_keys` / `exception_indexes` is populated,
/// depending on whether the grid identifies rows by key or by index.
#[derive(Debug, Clone)]
pub struct CheckboxChange {
    pub state: CheckboxState,
    pub kind: CheckboxChangeKind,
    pub changed_index: Option<usize>,
    pub changed_key: Option<String>,
    pub exception_indexes: Option<Vec<usize>>,
    pub exception_keys: Option<Vec<String>>,
}

/// Checkbox bookkeeping for one grid
#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    state: CheckboxState,
    by_index: AHashSet<usize>,
    by_key: AHashSet<String>,
    keyed: bool,
}

impl RowSelection {
    /// Create a selection tracker; `keyed` selects exception-by-key mode
    pub fn new(keyed: bool) -> Self {
        Self {
            keyed,
            ..Default::default()
        }
    }

    pub fn state(&self) -> CheckboxState {
        self.state
    }

    /// True when no row is checked at all
    pub fn is_empty(&self) -> bool {
        self.state == CheckboxState::AllUnchecked
    }

    /// True when the header checkbox should render fully checked
    pub fn all_checked(&self) -> bool {
        self.state == CheckboxState::AllChecked
    }

    /// True when the header checkbox should render indeterminate
    pub fn indeterminate(&self) -> bool {
        matches!(
            self.state,
            CheckboxState::SomeChecked | CheckboxState::SomeUnchecked
        )
    }

    /// Whether the row at `index` (with optional key) renders checked
    pub fn is_row_checked(&self, index: usize, key: Option<&str>) -> bool {
        let excepted = match (self.keyed, key) {
            (true, Some(key)) => self.by_key.contains(key),
            _ => self.by_index.contains(&index),
        };
        if self.state.base_checked() {
            !excepted
        } else {
            excepted
        }
    }

    /// Snapshot of the active exception set
    pub fn exception_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.by_key.iter().cloned().collect();
        keys.sort();
        keys
    }

    pub fn exception_indexes(&self) -> Vec<usize> {
        let mut indexes: Vec<usize> = self.by_index.iter().copied().collect();
        indexes.sort_unstable();
        indexes
    }

    /// Header checkbox click: flip the base state, drop all exceptions
    pub fn toggle_all(&mut self) -> CheckboxChange {
        self.state = if self.all_checked() {
            CheckboxState::AllUnchecked
        } else {
            CheckboxState::AllChecked
        };
        self.by_index.clear();
        self.by_key.clear();
        self.change(CheckboxChangeKind::All, None, None)
    }

    /// Single row click
    pub fn toggle_row(&mut self, index: usize, key: Option<&str>) -> CheckboxChange {
        let (changed_index, changed_key) = if self.keyed {
            let key = key.unwrap_or_default().to_string();
            if !self.by_key.remove(&key) {
                self.by_key.insert(key.clone());
            }
            (None, Some(key))
        } else {
            if !self.by_index.remove(&index) {
                self.by_index.insert(index);
            }
            (Some(index), None)
        };
        self.recompute();
        self.change(CheckboxChangeKind::Single, changed_index, changed_key)
    }

    /// Reset to all-unchecked (e.g. after a bulk operation or data reload)
    pub fn clear(&mut self) {
        self.state = CheckboxState::AllUnchecked;
        self.by_index.clear();
        self.by_key.clear();
    }

    fn exception_len(&self) -> usize {
        if self.keyed {
            self.by_key.len()
        } else {
            self.by_index.len()
        }
    }

    fn recompute(&mut self) {
        let empty = self.exception_len() == 0;
        self.state = if self.state.base_checked() {
            if empty {
                CheckboxState::AllChecked
            } else {
                CheckboxState::SomeUnchecked
            }
        } else if empty {
            CheckboxState::AllUnchecked
        } else {
            CheckboxState::SomeChecked
        };
    }

    fn change(
        &self,
        kind: CheckboxChangeKind,
        changed_index: Option<usize>,
        changed_key: Option<String>,
    ) -> CheckboxChange {
        CheckboxChange {
            state: self.state,
            kind,
            changed_index,
            changed_key,
            exception_indexes: (!self.keyed).then(|| self.exception_indexes()),
            exception_keys: self.keyed.then(|| self.exception_keys()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_row_from_all_unchecked() {
        let mut sel = RowSelection::new(false);
        let change = sel.toggle_row(3, None);
        assert_eq!(change.state, CheckboxState::SomeChecked);
        assert_eq!(change.exception_indexes.as_deref(), Some(&[3][..]));
        assert!(sel.is_row_checked(3, None));
        assert!(!sel.is_row_checked(0, None));

        let change = sel.toggle_row(3, None);
        assert_eq!(change.state, CheckboxState::AllUnchecked);
        assert_eq!(change.exception_indexes.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_toggle_row_from_all_checked() {
        let mut sel = RowSelection::new(false);
        sel.toggle_all();
        assert_eq!(sel.state(), CheckboxState::AllChecked);
        assert!(sel.is_row_checked(7, None));

        let change = sel.toggle_row(7, None);
        assert_eq!(change.state, CheckboxState::SomeUnchecked);
        assert!(!sel.is_row_checked(7, None));
        assert!(sel.is_row_checked(0, None));
    }

    #[test]
    fn test_toggle_all_clears_exceptions() {
        let mut sel = RowSelection::new(false);
        sel.toggle_row(1, None);
        sel.toggle_row(2, None);
        let change = sel.toggle_all();
        assert_eq!(change.state, CheckboxState::AllChecked);
        assert!(change.exception_indexes.expect("index mode").is_empty());
    }

    #[test]
    fn test_keyed_mode_tracks_keys_not_indexes() {
        let mut sel = RowSelection::new(true);
        let change = sel.toggle_row(0, Some("ps-9"));
        assert_eq!(change.changed_key.as_deref(), Some("ps-9"));
        assert_eq!(change.changed_index, None);
        assert_eq!(change.exception_keys.as_deref(), Some(&["ps-9".to_string()][..]));
        assert!(change.exception_indexes.is_none());
        // A different index with the same key hits the same entry.
        assert!(sel.is_row_checked(42, Some("ps-9")));
    }

    #[test]
    fn test_empty_exceptions_means_bulk_state() {
        let mut sel = RowSelection::new(false);
        sel.toggle_all();
        sel.toggle_row(0, None);
        sel.toggle_row(0, None);
        assert_eq!(sel.state(), CheckboxState::AllChecked);
        assert!(sel.exception_indexes().is_empty());
    }
}
