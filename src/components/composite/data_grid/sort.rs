//! Sort State for the DataGrid
//!
//! Header clicks cycle `none -> asc -> desc -> asc -> ...`. Once a column
//! has been sorted it never returns to `none`; clicking another column
//! resets every other column instead. The backend's numeric direction
//! convention (0 unsorted / 1 descending / 2 ascending) only exists at the
//! API boundary.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Sort direction of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Numeric wire code used by the backend (0 unsorted / 1 desc / 2 asc)
    pub fn wire_code(&self) -> u8 {
        match self {
            SortDirection::None => 0,
            SortDirection::Desc => 1,
            SortDirection::Asc => 2,
        }
    }

    /// Indicator glyph for the header cell
    pub fn glyph(&self) -> &'static str {
        match self {
            SortDirection::None => "",
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Emitted whenever a sortable header is clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEvent {
    /// Backend sort field (the column's `sort_field` override when set)
    pub column: String,
    pub direction: SortDirection,
}

/// Per-column sort directions for one grid
#[derive(Debug, Clone, Default)]
pub struct SortState {
    directions: AHashMap<String, SortDirection>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an initial sort (e.g. the page's default sort column)
    pub fn set(&mut self, column: &str, direction: SortDirection) {
        self.directions.clear();
        self.directions.insert(column.to_string(), direction);
    }

    /// Current direction of a column
    pub fn direction(&self, column: &str) -> SortDirection {
        self.directions
            .get(column)
            .copied()
            .unwrap_or(SortDirection::None)
    }

    /// Whether the column currently drives the sort order
    pub fn is_sorted(&self, column: &str) -> bool {
        self.direction(column) != SortDirection::None
    }

    /// Advance a column through the click cycle and reset all others.
    ///
    /// Returns the column's new direction.
    pub fn cycle(&mut self, column: &str) -> SortDirection {
        let next = match self.direction(column) {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            // Back to asc rather than none: a sorted grid stays sorted.
            SortDirection::Desc => SortDirection::Asc,
        };
        self.directions.clear();
        self.directions.insert(column.to_string(), next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_never_returns_to_none() {
        let mut sort = SortState::new();
        assert_eq!(sort.cycle("tests"), SortDirection::Asc);
        assert_eq!(sort.cycle("tests"), SortDirection::Desc);
        assert_eq!(sort.cycle("tests"), SortDirection::Asc);
        assert_eq!(sort.cycle("tests"), SortDirection::Desc);
    }

    #[test]
    fn test_cycle_resets_other_columns() {
        let mut sort = SortState::new();
        sort.cycle("tests");
        sort.cycle("visits");
        assert_eq!(sort.direction("tests"), SortDirection::None);
        assert_eq!(sort.direction("visits"), SortDirection::Asc);
        assert!(!sort.is_sorted("tests"));
        assert!(sort.is_sorted("visits"));
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(SortDirection::None.wire_code(), 0);
        assert_eq!(SortDirection::Desc.wire_code(), 1);
        assert_eq!(SortDirection::Asc.wire_code(), 2);
    }
}
