//! Inline Row Editing
//!
//! While a row is in edit mode its editable cells are held as flat lists
//! of ids in an [`EditBuffer`], seeded through the grid's edit-key map
//! (display key -> edit-value key, e.g. `testsDisplay` -> `testsValues`).
//! Saving validates that no editable column is left empty, then writes the
//! buffer back through [`GridRow::apply_edit`]. Only one row may be in
//! edit mode at a time; the buffer itself enforces nothing about that —
//! the grid owns a single optional buffer.

use ahash::AHashMap;

use super::cell::GridRow;
use super::column::ColumnSpec;

/// Maps display column keys to the keys edit values are stored under
pub type EditKeyMap = AHashMap<String, String>;

/// Resolve a column key through the edit-key map
pub fn edit_key<'a>(key_map: &'a EditKeyMap, column_key: &'a str) -> &'a str {
    key_map.get(column_key).map(String::as_str).unwrap_or(column_key)
}

/// Transient flat representation of a row's editable values
#[derive(Debug, Clone)]
pub struct EditBuffer {
    row_index: usize,
    values: AHashMap<String, Vec<String>>,
}

impl EditBuffer {
    /// Seed a buffer from a row's editable columns.
    ///
    /// Values are read from the row under the mapped edit key; list values
    /// are copied, scalar values wrapped in a one-element list.
    pub fn seed<R: GridRow>(
        row: &R,
        row_index: usize,
        columns: &[ColumnSpec],
        key_map: &EditKeyMap,
    ) -> Self {
        let mut values = AHashMap::new();
        for column in columns.iter().filter(|c| c.editable && c.is_data()) {
            let value_key = edit_key(key_map, &column.key);
            values.insert(
                column.key.to_string(),
                row.cell(value_key).to_edit_values(),
            );
        }
        Self { row_index, values }
    }

    /// Index of the row being edited
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Current values for a column key
    pub fn values(&self, column_key: &str) -> &[String] {
        self.values
            .get(column_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace a column's values outright
    pub fn set_values(&mut self, column_key: &str, values: Vec<String>) {
        self.values.insert(column_key.to_string(), values);
    }

    /// Toggle membership of `id` in a multi-select column's values
    pub fn toggle_value(&mut self, column_key: &str, id: &str) {
        let values = self.values.entry(column_key.to_string()).or_default();
        if let Some(pos) = values.iter().position(|v| v == id) {
            values.remove(pos);
        } else {
            values.push(id.to_string());
        }
    }

    /// Replace a single-select column's value
    pub fn select_value(&mut self, column_key: &str, id: &str) {
        self.values
            .insert(column_key.to_string(), vec![id.to_string()]);
    }

    /// Whether `id` is present in a column's values
    pub fn contains(&self, column_key: &str, id: &str) -> bool {
        self.values(column_key).iter().any(|v| v == id)
    }

    /// Validation gate: every editable data column must have a value
    pub fn is_complete(&self, columns: &[ColumnSpec]) -> bool {
        columns
            .iter()
            .filter(|c| c.editable && c.is_data())
            .all(|c| !self.values(&c.key).is_empty())
    }

    /// Write the buffer back into the row under the mapped edit keys.
    ///
    /// Multi-select columns keep the full list; single-select columns keep
    /// only the sole element. Returns the updated row; the caller replaces
    /// the original in place and persists upstream.
    pub fn commit<R: GridRow>(
        &self,
        row: &R,
        columns: &[ColumnSpec],
        key_map: &EditKeyMap,
    ) -> R {
        let mut patch: AHashMap<String, Vec<String>> = AHashMap::new();
        for column in columns.iter().filter(|c| c.editable && c.is_data()) {
            let selected = self.values(&column.key);
            if selected.is_empty() {
                continue;
            }
            let value_key = edit_key(key_map, &column.key).to_string();
            let values = if column.multi_select {
                selected.to_vec()
            } else {
                vec![selected[0].clone()]
            };
            patch.insert(value_key, values);
        }
        let mut updated = row.clone();
        updated.apply_edit(&patch);
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::composite::data_grid::cell::CellValue;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct FakeRow {
        tests_values: Vec<String>,
        cohort_value: Vec<String>,
        blind: String,
    }

    impl GridRow for FakeRow {
        fn cell(&self, key: &str) -> CellValue {
            match key {
                "testsValues" => CellValue::List(self.tests_values.clone()),
                "cohortValue" => CellValue::List(self.cohort_value.clone()),
                "blindOrHide" => CellValue::Text(self.blind.clone()),
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
            if let Some(blind) = values.get("blindOrHide") {
                self.blind = blind.first().cloned().unwrap_or_default();
            }
        }
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::checkbox(),
            ColumnSpec::new("testsDisplay", "Tests").editable(true),
            ColumnSpec::new("cohortName", "Cohort").editable(false),
            ColumnSpec::new("blindOrHide", "Blind/Hide").editable(false),
            ColumnSpec::action("Action"),
        ]
    }

    fn key_map() -> EditKeyMap {
        EditKeyMap::from_iter([
            ("testsDisplay".to_string(), "testsValues".to_string()),
            ("cohortName".to_string(), "cohortValue".to_string()),
        ])
    }

    fn row() -> FakeRow {
        FakeRow {
            tests_values: vec!["T1@2".to_string()],
            cohort_value: vec!["C1@1".to_string()],
            blind: "Blind".to_string(),
        }
    }

    #[test]
    fn test_seed_flattens_through_key_map() {
        let buffer = EditBuffer::seed(&row(), 4, &columns(), &key_map());
        assert_eq!(buffer.row_index(), 4);
        assert_eq!(buffer.values("testsDisplay"), ["T1@2".to_string()]);
        assert_eq!(buffer.values("cohortName"), ["C1@1".to_string()]);
        // Scalar cell wrapped in a one-element list.
        assert_eq!(buffer.values("blindOrHide"), ["Blind".to_string()]);
    }

    #[test]
    fn test_toggle_and_select() {
        let mut buffer = EditBuffer::seed(&row(), 0, &columns(), &key_map());
        buffer.toggle_value("testsDisplay", "T2@1");
        assert!(buffer.contains("testsDisplay", "T2@1"));
        buffer.toggle_value("testsDisplay", "T1@2");
        assert!(!buffer.contains("testsDisplay", "T1@2"));

        buffer.select_value("blindOrHide", "Hide");
        assert_eq!(buffer.values("blindOrHide"), ["Hide".to_string()]);
    }

    #[test]
    fn test_incomplete_buffer_blocks_save() {
        let mut buffer = EditBuffer::seed(&row(), 0, &columns(), &key_map());
        assert!(buffer.is_complete(&columns()));
        buffer.set_values("cohortName", Vec::new());
        assert!(!buffer.is_complete(&columns()));
    }

    #[test]
    fn test_commit_respects_cardinality() {
        let mut buffer = EditBuffer::seed(&row(), 0, &columns(), &key_map());
        buffer.set_values(
            "testsDisplay",
            vec!["T1@2".to_string(), "T2@1".to_string()],
        );
        buffer.select_value("blindOrHide", "Hide");
        let updated = buffer.commit(&row(), &columns(), &key_map());
        assert_eq!(
            updated.tests_values,
            vec!["T1@2".to_string(), "T2@1".to_string()]
        );
        assert_eq!(updated.blind, "Hide");
        // Untouched column keeps its value.
        assert_eq!(updated.cohort_value, vec!["C1@1".to_string()]);
    }
}
