//! Column Definition
//!
//! Declarative column specs drive rendering, sorting, and editing of the
//! DataGrid. Cells are looked up from the row by `key`; sorting is emitted
//! with `sort_field` when the backend field name differs from the display
//! key.

use gpui::SharedString;

/// Column width specification
#[derive(Debug, Clone, Copy)]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Fixed(f32),
    /// Flexible width with optional min/max
    Flex { min: Option<f32>, max: Option<f32> },
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex { min: None, max: None }
    }
}

/// Column definition for the DataGrid
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Row cell key
    pub key: SharedString,
    /// Column header label
    pub title: SharedString,
    /// Column width
    pub width: ColumnWidth,
    /// Whether the header is click-sortable
    pub sortable: bool,
    /// Backend sort field, when it differs from `key`
    pub sort_field: Option<SharedString>,
    /// Whether the cell participates in inline editing
    pub editable: bool,
    /// Editing cardinality: true allows multiple values
    pub multi_select: bool,
    /// Label shown when a cell covers the column's whole option set
    pub all_options_text: Option<SharedString>,
    /// Renders the row checkbox instead of a value
    pub is_checkbox: bool,
    /// Renders row actions instead of a value
    pub is_action: bool,
}

impl ColumnSpec {
    /// Create a plain text column
    pub fn new(key: impl Into<SharedString>, title: impl Into<SharedString>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: ColumnWidth::default(),
            sortable: false,
            sort_field: None,
            editable: false,
            multi_select: false,
            all_options_text: None,
            is_checkbox: false,
            is_action: false,
        }
    }

    /// Create the checkbox column
    pub fn checkbox() -> Self {
        let mut spec = Self::new("checkbox", "");
        spec.is_checkbox = true;
        spec.width = ColumnWidth::Fixed(48.0);
        spec
    }

    /// Create the row-action column
    pub fn action(title: impl Into<SharedString>) -> Self {
        let mut spec = Self::new("action", title);
        spec.is_action = true;
        spec.width = ColumnWidth::Fixed(88.0);
        spec
    }

    /// Mark the column sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the backend sort field override
    pub fn sort_field(mut self, field: impl Into<SharedString>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// Mark the column editable; `multi` selects the editing cardinality
    pub fn editable(mut self, multi: bool) -> Self {
        self.editable = true;
        self.multi_select = multi;
        self
    }

    /// Set the "All X" sentinel label
    pub fn all_options(mut self, text: impl Into<SharedString>) -> Self {
        self.all_options_text = Some(text.into());
        self
    }

    /// Set fixed width
    pub fn fixed_width(mut self, width: f32) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set flexible width with optional constraints
    pub fn flex_width(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.width = ColumnWidth::Flex { min, max };
        self
    }

    /// The field name emitted with sort events
    pub fn sort_key(&self) -> SharedString {
        self.sort_field.clone().unwrap_or_else(|| self.key.clone())
    }

    /// Whether the column carries a data value (not checkbox/action)
    pub fn is_data(&self) -> bool {
        !self.is_checkbox && !self.is_action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_prefers_override() {
        let plain = ColumnSpec::new("cohortName", "Cohort").sortable();
        assert_eq!(plain.sort_key().as_ref(), "cohortName");

        let overridden = ColumnSpec::new("testsDisplay", "Tests")
            .sortable()
            .sort_field("Tests");
        assert_eq!(overridden.sort_key().as_ref(), "Tests");
    }

    #[test]
    fn test_checkbox_and_action_are_not_data() {
        assert!(!ColumnSpec::checkbox().is_data());
        assert!(!ColumnSpec::action("Action").is_data());
        assert!(ColumnSpec::new("url", "URL").is_data());
    }
}
