//! DataGrid Component
//!
//! A generic tabular view: column-driven rendering, sortable headers, row
//! checkboxes with exception-set bookkeeping, and optional inline row
//! editing. The grid never sorts or fetches data itself; it renders what
//! it is given and reports intent (sort changed, checkbox changed, row
//! saved) to its owner.

use gpui::{
    div, prelude::*, px, App, ClickEvent, Context, IntoElement, ParentElement, Render,
    SharedString, Styled, Window,
};

use crate::components::primitives::checkbox::Checkbox;
use crate::domain::selection::SelectionOption;
use crate::theme::colors::CtrColors;

use super::cell::{display_value, ColumnOptions, GridRow};
use super::column::{ColumnSpec, ColumnWidth};
use super::edit::{EditBuffer, EditKeyMap};
use super::row_selection::{CheckboxChange, RowSelection};
use super::sort::{SortEvent, SortState};

/// DataGrid component
pub struct DataGrid<R: GridRow + 'static> {
    columns: Vec<ColumnSpec>,
    rows: Vec<R>,
    /// Reference options per column key (label lookup, "All X" collapse,
    /// and the option lists offered while editing)
    edit_options: ColumnOptions,
    /// Display key -> edit value key
    edit_key_map: EditKeyMap,
    sort: SortState,
    selection: RowSelection,
    edit: Option<EditBuffer>,
    /// Column key of the currently open edit dropdown
    open_edit_menu: Option<String>,
    keyed: bool,
    enable_edit: bool,
    loading: bool,
    empty_message: SharedString,
    row_height: f32,
    header_height: f32,
    on_sort: Option<Box<dyn Fn(&SortEvent, &mut App) + 'static>>,
    on_checkbox: Option<Box<dyn Fn(&CheckboxChange, &mut App) + 'static>>,
    on_row_saved: Option<Box<dyn Fn(usize, &R, &mut App) + 'static>>,
    on_edit_canceled: Option<Box<dyn Fn(usize, &mut App) + 'static>>,
    on_edit_changed: Option<Box<dyn Fn(&str, &[String], &mut App) + 'static>>,
    on_action: Option<Box<dyn Fn(usize, &mut App) + 'static>>,
}

impl<R: GridRow + 'static> DataGrid<R> {
    /// Create a new data grid
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            edit_options: ColumnOptions::default(),
            edit_key_map: EditKeyMap::default(),
            sort: SortState::new(),
            selection: RowSelection::new(false),
            edit: None,
            open_edit_menu: None,
            keyed: false,
            enable_edit: false,
            loading: false,
            empty_message: "No data".into(),
            row_height: 40.0,
            header_height: 44.0,
            on_sort: None,
            on_checkbox: None,
            on_row_saved: None,
            on_edit_canceled: None,
            on_edit_changed: None,
            on_action: None,
        }
    }

    // ---- configuration ----------------------------------------------------

    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) {
        self.columns = columns;
    }

    /// Replace the rows; any edit in progress is dropped
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.edit = None;
        self.open_edit_menu = None;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_empty_message(&mut self, message: impl Into<SharedString>) {
        self.empty_message = message.into();
    }

    /// Track checkbox exceptions by the rows' unique key instead of index
    pub fn set_keyed(&mut self, keyed: bool) {
        self.keyed = keyed;
        self.selection = RowSelection::new(keyed);
    }

    pub fn set_enable_edit(&mut self, enable: bool) {
        self.enable_edit = enable;
    }

    pub fn set_edit_options(&mut self, options: ColumnOptions) {
        self.edit_options = options;
    }

    pub fn set_edit_key_map(&mut self, key_map: EditKeyMap) {
        self.edit_key_map = key_map;
    }

    /// Seed the default sort without emitting
    pub fn seed_sort(&mut self, column: &str, direction: super::sort::SortDirection) {
        self.sort.set(column, direction);
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn on_sort(&mut self, handler: impl Fn(&SortEvent, &mut App) + 'static) {
        self.on_sort = Some(Box::new(handler));
    }

    pub fn on_checkbox(&mut self, handler: impl Fn(&CheckboxChange, &mut App) + 'static) {
        self.on_checkbox = Some(Box::new(handler));
    }

    pub fn on_row_saved(&mut self, handler: impl Fn(usize, &R, &mut App) + 'static) {
        self.on_row_saved = Some(Box::new(handler));
    }

    pub fn on_edit_canceled(&mut self, handler: impl Fn(usize, &mut App) + 'static) {
        self.on_edit_canceled = Some(Box::new(handler));
    }

    /// Fires on every edit-buffer mutation with the column key and its
    /// new values (drives cross-entity validation upstream)
    pub fn on_edit_changed(&mut self, handler: impl Fn(&str, &[String], &mut App) + 'static) {
        self.on_edit_changed = Some(Box::new(handler));
    }

    pub fn on_action(&mut self, handler: impl Fn(usize, &mut App) + 'static) {
        self.on_action = Some(Box::new(handler));
    }

    // ---- sorting ----------------------------------------------------------

    fn header_clicked(&mut self, column_key: &str, cx: &mut Context<Self>) {
        let Some(column) = self.columns.iter().find(|c| c.key.as_ref() == column_key) else {
            return;
        };
        if !column.sortable {
            return;
        }
        let sort_key = column.sort_key().to_string();
        let key = column.key.to_string();
        let direction = self.sort.cycle(&key);
        let event = SortEvent {
            column: sort_key,
            direction,
        };
        if let Some(handler) = &self.on_sort {
            handler(&event, cx);
        }
        cx.notify();
    }

    // ---- checkbox selection ----------------------------------------------

    fn toggle_all_rows(&mut self, cx: &mut Context<Self>) {
        let change = self.selection.toggle_all();
        if let Some(handler) = &self.on_checkbox {
            handler(&change, cx);
        }
        cx.notify();
    }

    fn toggle_row(&mut self, index: usize, cx: &mut Context<Self>) {
        let key = if self.keyed {
            self.rows.get(index).and_then(|r| r.row_key())
        } else {
            None
        };
        let change = self.selection.toggle_row(index, key.as_deref());
        if let Some(handler) = &self.on_checkbox {
            handler(&change, cx);
        }
        cx.notify();
    }

    fn row_checked(&self, index: usize) -> bool {
        let key = if self.keyed {
            self.rows.get(index).and_then(|r| r.row_key())
        } else {
            None
        };
        self.selection.is_row_checked(index, key.as_deref())
    }

    // ---- inline editing ---------------------------------------------------

    /// Whether the given row is in edit mode
    pub fn is_editing(&self, index: usize) -> bool {
        self.edit.as_ref().map(EditBuffer::row_index) == Some(index)
    }

    /// Enter edit mode for one row; only one row edits at a time
    pub fn start_edit(&mut self, index: usize, cx: &mut Context<Self>) {
        if !self.enable_edit {
            return;
        }
        let Some(row) = self.rows.get(index) else {
            return;
        };
        self.edit = Some(EditBuffer::seed(
            row,
            index,
            &self.columns,
            &self.edit_key_map,
        ));
        self.open_edit_menu = None;
        cx.notify();
    }

    /// Discard the edit buffer; emits only the cancellation
    pub fn cancel_edit(&mut self, cx: &mut Context<Self>) {
        if let Some(buffer) = self.edit.take() {
            self.open_edit_menu = None;
            if let Some(handler) = &self.on_edit_canceled {
                handler(buffer.row_index(), cx);
            }
            cx.notify();
        }
    }

    /// Commit the edit buffer back into the row. Refused while any
    /// editable column's buffer is empty.
    pub fn save_edit(&mut self, cx: &mut Context<Self>) {
        let Some(buffer) = &self.edit else {
            return;
        };
        if !buffer.is_complete(&self.columns) {
            return;
        }
        let index = buffer.row_index();
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let updated = buffer.commit(row, &self.columns, &self.edit_key_map);
        self.rows[index] = updated.clone();
        self.edit = None;
        self.open_edit_menu = None;
        if let Some(handler) = &self.on_row_saved {
            handler(index, &updated, cx);
        }
        cx.notify();
    }

    /// Toggle or select a value in the open edit dropdown
    fn edit_value_clicked(&mut self, column_key: &str, id: &str, cx: &mut Context<Self>) {
        let multi = self
            .columns
            .iter()
            .find(|c| c.key.as_ref() == column_key)
            .map(|c| c.multi_select)
            .unwrap_or(false);
        let Some(buffer) = &mut self.edit else {
            return;
        };
        if multi {
            buffer.toggle_value(column_key, id);
        } else {
            buffer.select_value(column_key, id);
            self.open_edit_menu = None;
        }
        let values = buffer.values(column_key).to_vec();
        if let Some(handler) = &self.on_edit_changed {
            handler(column_key, &values, cx);
        }
        cx.notify();
    }

    /// Replace a column's buffered values outright (used by owners that
    /// cascade resets, e.g. clearing visits when the cohort empties)
    pub fn set_edit_values(&mut self, column_key: &str, values: Vec<String>, cx: &mut Context<Self>) {
        if let Some(buffer) = &mut self.edit {
            buffer.set_values(column_key, values);
            cx.notify();
        }
    }

    fn toggle_edit_menu(&mut self, column_key: &str, cx: &mut Context<Self>) {
        if self.open_edit_menu.as_deref() == Some(column_key) {
            self.open_edit_menu = None;
        } else {
            self.open_edit_menu = Some(column_key.to_string());
        }
        cx.notify();
    }

    // ---- rendering --------------------------------------------------------

    fn column_width(&self, width: &ColumnWidth) -> f32 {
        match width {
            ColumnWidth::Fixed(w) => *w,
            ColumnWidth::Flex { min, .. } => min.unwrap_or(160.0),
        }
    }

    fn render_header(&mut self, cx: &mut Context<Self>) -> gpui::AnyElement {
        let columns = self.columns.clone();
        let mut header = div()
            .h(px(self.header_height))
            .w_full()
            .flex()
            .items_center()
            .bg(CtrColors::table_header_bg())
            .border_b_1()
            .border_color(CtrColors::border());

        for (col_ix, column) in columns.iter().enumerate() {
            let width = self.column_width(&column.width);
            let cell = if column.is_checkbox {
                div()
                    .w(px(width))
                    .px_3()
                    .flex()
                    .justify_center()
                    .child(
                        Checkbox::new(("grid-check-all", col_ix))
                            .checked(self.selection.all_checked())
                            .indeterminate(self.selection.indeterminate())
                            .on_change(cx.listener(|this, _checked: &bool, _window, cx| {
                                this.toggle_all_rows(cx);
                            })),
                    )
                    .into_any_element()
            } else {
                let key = column.key.to_string();
                let direction = self.sort.direction(&key);
                let mut cell = div()
                    .id(("grid-header", col_ix))
                    .w(px(width))
                    .px_3()
                    .flex()
                    .items_center()
                    .gap_1()
                    .text_sm()
                    .font_weight(gpui::FontWeight::MEDIUM)
                    .text_color(CtrColors::text_primary())
                    .child(column.title.clone());
                if column.sortable {
                    cell = cell
                        .cursor_pointer()
                        .hover(|s| s.bg(CtrColors::table_row_hover()))
                        .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                            this.header_clicked(&key, cx);
                        }))
                        .child(
                            div()
                                .text_size(px(10.0))
                                .text_color(CtrColors::text_secondary())
                                .child(direction.glyph()),
                        );
                }
                cell.into_any_element()
            };
            header = header.child(cell);
        }

        header.into_any_element()
    }

    fn render_edit_cell(
        &self,
        index: usize,
        column: &ColumnSpec,
        width: f32,
        cx: &mut Context<Self>,
    ) -> gpui::AnyElement {
        let key = column.key.to_string();
        let options = self
            .edit_options
            .get(&key)
            .cloned()
            .unwrap_or_default();
        let buffer = self.edit.as_ref();
        let values: Vec<String> = buffer.map(|b| b.values(&key).to_vec()).unwrap_or_default();
        let summary = if values.is_empty() {
            "Select...".to_string()
        } else {
            values
                .iter()
                .map(|id| {
                    options
                        .iter()
                        .find(|o| &o.id == id)
                        .map(|o| o.text.clone())
                        .unwrap_or_else(|| id.clone())
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        let empty = values.is_empty();
        let menu_open = self.open_edit_menu.as_deref() == Some(key.as_str());

        let toggle_key = key.clone();
        let mut cell = div()
            .w(px(width))
            .px_3()
            .relative()
            .flex()
            .flex_col()
            .child(
                div()
                    .id(("grid-edit-cell", index))
                    .px_2()
                    .py_1()
                    .border_1()
                    .border_color(if empty {
                        CtrColors::danger()
                    } else {
                        CtrColors::input_border()
                    })
                    .rounded_md()
                    .text_sm()
                    .cursor_pointer()
                    .text_color(if empty {
                        CtrColors::input_placeholder()
                    } else {
                        CtrColors::text_primary()
                    })
                    .overflow_hidden()
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.toggle_edit_menu(&toggle_key, cx);
                    }))
                    .child(summary),
            );

        if menu_open {
            let mut menu = div()
                .id(("grid-edit-menu", index))
                .absolute()
                .top(px(34.0))
                .left_0()
                .w(px(width.max(180.0)))
                .max_h(px(220.0))
                .overflow_y_scroll()
                .bg(CtrColors::content_bg())
                .border_1()
                .border_color(CtrColors::border())
                .rounded_md()
                .shadow_lg()
                .flex()
                .flex_col();

            if options.is_empty() {
                menu = menu.child(
                    div()
                        .px_3()
                        .py_2()
                        .text_sm()
                        .text_color(CtrColors::text_muted())
                        .child("No options"),
                );
            }
            for (opt_ix, option) in options.iter().enumerate() {
                let selected = values.iter().any(|v| v == &option.id);
                let value_key = key.clone();
                let option_id = option.id.clone();
                let mut row = div()
                    .id(("grid-edit-option", opt_ix))
                    .px_3()
                    .py_2()
                    .flex()
                    .items_center()
                    .gap_2()
                    .text_sm()
                    .cursor_pointer()
                    .hover(|s| s.bg(CtrColors::table_row_hover()))
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.edit_value_clicked(&value_key, &option_id, cx);
                    }));
                if column.multi_select {
                    row = row.child(
                        Checkbox::new(("grid-edit-option-check", opt_ix)).checked(selected),
                    );
                }
                row = row.child(
                    div()
                        .text_color(if selected && !column.multi_select {
                            CtrColors::accent()
                        } else {
                            CtrColors::text_primary()
                        })
                        .child(option.text.clone()),
                );
                menu = menu.child(row);
            }
            cell = cell.child(menu);
        }

        cell.into_any_element()
    }

    fn render_row(&self, index: usize, cx: &mut Context<Self>) -> gpui::AnyElement {
        let editing = self.is_editing(index);
        let checked = self.row_checked(index);
        let bg = if editing {
            CtrColors::table_row_selected()
        } else if index % 2 == 0 {
            CtrColors::content_bg()
        } else {
            CtrColors::table_row_alt()
        };

        let mut row_el = div()
            .min_h(px(self.row_height))
            .w_full()
            .flex()
            .items_center()
            .bg(bg)
            .border_b_1()
            .border_color(CtrColors::border());
        if !editing {
            row_el = row_el.hover(|s| s.bg(CtrColors::table_row_hover()));
        }

        let columns = self.columns.clone();
        for column in &columns {
            let width = self.column_width(&column.width);
            let cell = if column.is_checkbox {
                div()
                    .w(px(width))
                    .px_3()
                    .flex()
                    .justify_center()
                    .child(
                        Checkbox::new(("grid-check", index))
                            .checked(checked)
                            .on_change(cx.listener(move |this, _checked: &bool, _window, cx| {
                                this.toggle_row(index, cx);
                            })),
                    )
                    .into_any_element()
            } else if column.is_action {
                self.render_action_cell(index, editing, width, cx)
            } else if editing && column.editable {
                self.render_edit_cell(index, column, width, cx)
            } else {
                let value = self
                    .rows
                    .get(index)
                    .map(|r| r.cell(column.key.as_ref()))
                    .unwrap_or(super::cell::CellValue::Missing);
                let options: Option<&[SelectionOption]> = self
                    .edit_options
                    .get(column.key.as_ref())
                    .map(Vec::as_slice);
                div()
                    .w(px(width))
                    .px_3()
                    .text_sm()
                    .text_color(CtrColors::text_primary())
                    .overflow_hidden()
                    .child(display_value(&value, column, options))
                    .into_any_element()
            };
            row_el = row_el.child(cell);
        }

        row_el.into_any_element()
    }

    fn render_action_cell(
        &self,
        index: usize,
        editing: bool,
        width: f32,
        cx: &mut Context<Self>,
    ) -> gpui::AnyElement {
        let cell = div().w(px(width)).px_3().flex().items_center().gap_2();

        let cell = if editing {
            let can_save = self
                .edit
                .as_ref()
                .map(|b| b.is_complete(&self.columns))
                .unwrap_or(false);
            cell.child(
                div()
                    .id(("grid-save", index))
                    .text_sm()
                    .text_color(if can_save {
                        CtrColors::accent()
                    } else {
                        CtrColors::text_muted()
                    })
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.save_edit(cx);
                    }))
                    .child("Save"),
            )
            .child(
                div()
                    .id(("grid-cancel", index))
                    .text_sm()
                    .text_color(CtrColors::text_secondary())
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.cancel_edit(cx);
                    }))
                    .child("Cancel"),
            )
        } else if self.enable_edit {
            cell.child(
                div()
                    .id(("grid-edit", index))
                    .text_sm()
                    .text_color(CtrColors::accent())
                    .cursor_pointer()
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.start_edit(index, cx);
                    }))
                    .child("Edit"),
            )
        } else {
            cell.child(
                div()
                    .id(("grid-action", index))
                    .text_sm()
                    .text_color(CtrColors::accent())
                    .cursor_pointer()
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        if let Some(handler) = &this.on_action {
                            handler(index, cx);
                        }
                    }))
                    .child("View"),
            )
        };

        cell.into_any_element()
    }

    fn render_empty(&self) -> gpui::AnyElement {
        div()
            .flex_1()
            .py_8()
            .flex()
            .items_center()
            .justify_center()
            .text_color(CtrColors::text_muted())
            .child(self.empty_message.clone())
            .into_any_element()
    }

    fn render_loading(&self) -> gpui::AnyElement {
        div()
            .flex_1()
            .py_8()
            .flex()
            .items_center()
            .justify_center()
            .text_color(CtrColors::text_muted())
            .child("Loading...")
            .into_any_element()
    }
}

impl<R: GridRow + 'static> Render for DataGrid<R> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let mut table = div()
            .size_full()
            .flex()
            .flex_col()
            .bg(CtrColors::content_bg())
            .border_1()
            .border_color(CtrColors::border())
            .rounded_md()
            .overflow_hidden();

        table = table.child(self.render_header(cx));

        if self.loading {
            table = table.child(self.render_loading());
        } else if self.rows.is_empty() {
            table = table.child(self.render_empty());
        } else {
            let mut body = div()
                .id("data-grid-rows")
                .flex_1()
                .overflow_y_scroll()
                .flex()
                .flex_col();
            for index in 0..self.rows.len() {
                body = body.child(self.render_row(index, cx));
            }
            table = table.child(body);
        }

        table
    }
}
