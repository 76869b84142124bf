//! Cell Values and Display Rendering
//!
//! Grid rows are opaque to the grid itself: each row type exposes its
//! cells through the [`GridRow`] trait as tagged [`CellValue`]s, keyed by
//! column key. Display strings are derived at render time from the value
//! plus the column's reference option set, so the display representation
//! can never drift from the edit representation.

use ahash::{AHashMap, AHashSet};

use crate::domain::selection::SelectionOption;

use super::column::ColumnSpec;

/// Placeholder rendered for empty cells
pub const EMPTY_CELL: &str = "-";

/// A single cell value, tagged by shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Scalar display text
    Text(String),
    /// A list of ids (resolved to labels through the column's options)
    List(Vec<String>),
    /// No value for this column
    Missing,
}

impl CellValue {
    /// The flat id list used to seed edit buffers: lists stay lists,
    /// scalars are wrapped, missing values become empty.
    pub fn to_edit_values(&self) -> Vec<String> {
        match self {
            CellValue::List(items) => items.clone(),
            CellValue::Text(value) if !value.is_empty() => vec![value.clone()],
            _ => Vec::new(),
        }
    }
}

/// A row the grid can render and edit without knowing its shape
pub trait GridRow: Clone {
    /// The cell value for a column (or edit-value) key
    fn cell(&self, key: &str) -> CellValue;

    /// Write back flat edit values, keyed by edit-value key
    fn apply_edit(&mut self, values: &AHashMap<String, Vec<String>>);

    /// Unique row key, when the row has one (enables keyed checkbox
    /// exceptions)
    fn row_key(&self) -> Option<String> {
        None
    }
}

/// Reference options per column key, used for label lookup and the
/// "All X" collapse
pub type ColumnOptions = AHashMap<String, Vec<SelectionOption>>;

/// Render a cell value as its display string.
///
/// List values are resolved against the column's reference options and
/// joined with `; `. When the list covers the column's entire reference
/// set (ignoring `All…` pseudo-options, compared as id sets), the
/// column's `all_options_text` is shown instead of the joined labels.
pub fn display_value(
    value: &CellValue,
    column: &ColumnSpec,
    options: Option<&[SelectionOption]>,
) -> String {
    match value {
        CellValue::Missing => EMPTY_CELL.to_string(),
        CellValue::Text(text) => {
            if text.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                text.clone()
            }
        }
        CellValue::List(items) => {
            if items.is_empty() {
                return EMPTY_CELL.to_string();
            }
            if let (Some(all_text), Some(options)) = (&column.all_options_text, options) {
                if covers_all_options(items, options) {
                    return all_text.to_string();
                }
            }
            items
                .iter()
                .map(|id| resolve_label(id, options))
                .collect::<Vec<_>>()
                .join("; ")
        }
    }
}

/// Whether `items` covers every real option (id-set equality, order-
/// independent, `All…` pseudo-options excluded from the reference set).
fn covers_all_options(items: &[String], options: &[SelectionOption]) -> bool {
    let actual: AHashSet<&str> = options
        .iter()
        .filter(|opt| !opt.text.starts_with("All"))
        .map(|opt| opt.id.as_str())
        .collect();
    if actual.is_empty() {
        return false;
    }
    let selected: AHashSet<&str> = items.iter().map(String::as_str).collect();
    selected == actual
}

fn resolve_label(id: &str, options: Option<&[SelectionOption]>) -> String {
    options
        .and_then(|opts| opts.iter().find(|opt| opt.id == id))
        .map(|opt| opt.text.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::composite::data_grid::column::ColumnSpec;

    fn tests_column() -> ColumnSpec {
        ColumnSpec::new("testsDisplay", "Tests")
            .editable(true)
            .all_options("All Tests")
    }

    fn options() -> Vec<SelectionOption> {
        vec![
            SelectionOption::new("T1@2", "ALT"),
            SelectionOption::new("T2@1", "AST"),
            SelectionOption::new("all", "All Tests"),
        ]
    }

    #[test]
    fn test_list_joins_labels() {
        let value = CellValue::List(vec!["T1@2".to_string()]);
        assert_eq!(
            display_value(&value, &tests_column(), Some(&options())),
            "ALT"
        );
    }

    #[test]
    fn test_full_coverage_collapses_to_all_text() {
        // Order-independent id-set comparison, "All Tests" pseudo-option
        // excluded from the reference set.
        let value = CellValue::List(vec!["T2@1".to_string(), "T1@2".to_string()]);
        assert_eq!(
            display_value(&value, &tests_column(), Some(&options())),
            "All Tests"
        );
    }

    #[test]
    fn test_partial_coverage_stays_joined() {
        let value = CellValue::List(vec!["T2@1".to_string()]);
        assert_eq!(
            display_value(&value, &tests_column(), Some(&options())),
            "AST"
        );
    }

    #[test]
    fn test_unknown_ids_fall_back_to_raw_id() {
        let value = CellValue::List(vec!["T9@9".to_string()]);
        assert_eq!(
            display_value(&value, &tests_column(), Some(&options())),
            "T9@9"
        );
    }

    #[test]
    fn test_empty_values_render_placeholder() {
        assert_eq!(
            display_value(&CellValue::Missing, &tests_column(), None),
            "-"
        );
        assert_eq!(
            display_value(&CellValue::List(Vec::new()), &tests_column(), None),
            "-"
        );
        assert_eq!(
            display_value(&CellValue::Text(String::new()), &tests_column(), None),
            "-"
        );
    }

    #[test]
    fn test_edit_values_wrap_scalars() {
        assert_eq!(
            CellValue::Text("Blind".to_string()).to_edit_values(),
            vec!["Blind".to_string()]
        );
        assert!(CellValue::Missing.to_edit_values().is_empty());
        assert_eq!(
            CellValue::List(vec!["a".into(), "b".into()]).to_edit_values(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
