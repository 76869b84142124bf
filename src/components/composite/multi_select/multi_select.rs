//! MultiSelectField Component
//!
//! A dropdown form control bound to a [`SelectionCatalog`], in single- or
//! multi-select mode. The committed selection renders as chips with
//! overflow collapsing; while the dropdown is open a working copy is
//! edited and only committed on Apply. Catalog-backed fields page more
//! options in while the dropdown is open via a periodic readiness check
//! that is torn down on close.
//!
//! Static fields (options known up front) filter client-side on the
//! search text; catalog-backed (`virtual_scroll`) fields forward the
//! search to their owner, which debounces and reloads the catalog.

use gpui::{
    div, prelude::*, px, App, ClickEvent, Context, ElementId, InteractiveElement, IntoElement,
    ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::components::primitives::checkbox::Checkbox;
use crate::components::primitives::chip::Chip;
use crate::domain::selection::SelectionOption;
use crate::services::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
use crate::services::runtime;
use crate::theme::colors::CtrColors;

use super::catalog::{CatalogRequest, SelectionCatalog};
use super::chips;
use super::selection::{SelectionChange, SelectionState};

/// Interval between near-bottom readiness checks while open (ms)
const POLL_INTERVAL_MS: u64 = 500;
/// Width reserved for the "+N more" indicator and dropdown arrow
const ACTIONS_WIDTH: f32 = 70.0;

/// A multi-select (or single-select) dropdown field
pub struct MultiSelectField {
    id: ElementId,
    label: SharedString,
    placeholder: SharedString,
    all_options_text: SharedString,
    multi_select: bool,
    /// Catalog-backed server paging; false means static options with
    /// client-side search filtering
    virtual_scroll: bool,
    disabled: bool,
    open: bool,
    /// Bumped on every close; invalidates the running poll task
    open_generation: u64,
    search_text: String,
    catalog: SelectionCatalog,
    selection: SelectionState,
    /// Chip budget in pixels, set by the owning layout
    available_width: f32,
    validation_message: Option<SharedString>,
    search_debounce: Debouncer,
    on_change: Option<Box<dyn Fn(&SelectionChange, &mut App) + 'static>>,
    on_single: Option<Box<dyn Fn(&SelectionOption, &mut App) + 'static>>,
    on_load_more: Option<Box<dyn Fn(CatalogRequest, &mut App) + 'static>>,
    on_toggle: Option<Box<dyn Fn(bool, &mut App) + 'static>>,
}

impl MultiSelectField {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            placeholder: "Select...".into(),
            all_options_text: "All".into(),
            multi_select: true,
            virtual_scroll: false,
            disabled: false,
            open: false,
            open_generation: 0,
            search_text: String::new(),
            catalog: SelectionCatalog::default(),
            selection: SelectionState::new(),
            available_width: 360.0,
            validation_message: None,
            search_debounce: Debouncer::new(),
            on_change: None,
            on_single: None,
            on_load_more: None,
            on_toggle: None,
        }
    }

    // ---- configuration ----------------------------------------------------

    pub fn set_placeholder(&mut self, placeholder: impl Into<SharedString>) {
        self.placeholder = placeholder.into();
    }

    pub fn set_all_options_text(&mut self, text: impl Into<SharedString>) {
        self.all_options_text = text.into();
    }

    /// Single-select mode: toggling an option commits and closes
    pub fn set_single_select(&mut self) {
        self.multi_select = false;
    }

    /// Catalog-backed server paging with forwarded search
    pub fn set_virtual_scroll(&mut self, page_size: u32) {
        self.virtual_scroll = true;
        self.catalog = SelectionCatalog::new(page_size);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_available_width(&mut self, width: f32) {
        self.available_width = width;
    }

    /// Inline validation notice under the field (auto-dismiss is owned by
    /// the page's alert state)
    pub fn set_validation(&mut self, message: Option<SharedString>) {
        self.validation_message = message;
    }

    pub fn on_change(&mut self, handler: impl Fn(&SelectionChange, &mut App) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn on_single(&mut self, handler: impl Fn(&SelectionOption, &mut App) + 'static) {
        self.on_single = Some(Box::new(handler));
    }

    pub fn on_load_more(&mut self, handler: impl Fn(CatalogRequest, &mut App) + 'static) {
        self.on_load_more = Some(Box::new(handler));
    }

    pub fn on_toggle(&mut self, handler: impl Fn(bool, &mut App) + 'static) {
        self.on_toggle = Some(Box::new(handler));
    }

    // ---- catalog plumbing -------------------------------------------------

    pub fn catalog(&self) -> &SelectionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Load a full static option list in one shot. The previous option
    /// set is replaced wholesale, and the selection with it.
    pub fn set_static_options(&mut self, options: Vec<SelectionOption>, cx: &mut Context<Self>) {
        self.catalog.reset();
        self.selection.write_none();
        if let Some(request) = self.catalog.next_page_request() {
            let total = options.len();
            self.apply_page(request.version, options, total, cx);
        }
    }

    /// Apply a fetched catalog page; stale versions are discarded by the
    /// catalog itself. New items are absorbed into the selection while
    /// "all" is in force.
    pub fn apply_page(
        &mut self,
        version: u64,
        items: Vec<SelectionOption>,
        total_count: usize,
        cx: &mut Context<Self>,
    ) {
        if version != self.catalog.version() {
            return;
        }
        let mid_edit = self.open && self.selection.has_pending_changes();
        self.catalog.apply_page(version, items.clone(), total_count);
        self.selection.absorb_page(&items, mid_edit);
        if !mid_edit {
            self.selection.recompute_all(self.catalog.total_count());
        }
        cx.notify();
    }

    /// Record a failed page fetch
    pub fn apply_error(&mut self, version: u64, cx: &mut Context<Self>) {
        self.catalog.apply_error(version);
        cx.notify();
    }

    /// Reset the catalog (parent selection changed). The current
    /// selection is cleared with it.
    pub fn reset_catalog(&mut self, cx: &mut Context<Self>) {
        self.catalog.reset();
        self.selection.write_none();
        cx.notify();
    }

    // ---- external value writes -------------------------------------------

    /// External "All" sentinel value
    pub fn write_all(&mut self, cx: &mut Context<Self>) {
        self.selection.write_all();
        cx.notify();
    }

    /// Restore a selection from ids against the loaded options
    pub fn write_ids(&mut self, ids: &[String], cx: &mut Context<Self>) {
        let options = self.catalog.items().to_vec();
        self.selection.write_ids(ids, &options);
        self.selection.recompute_all(self.catalog.total_count());
        cx.notify();
    }

    pub fn write_none(&mut self, cx: &mut Context<Self>) {
        self.selection.write_none();
        cx.notify();
    }

    // ---- dropdown state machine ------------------------------------------

    /// Open or close on field click
    pub fn toggle_dropdown(&mut self, cx: &mut Context<Self>) {
        if self.disabled {
            return;
        }
        if self.open {
            self.close_dropdown(cx);
            return;
        }
        self.open = true;
        self.selection.open();
        if let Some(handler) = &self.on_toggle {
            handler(true, cx);
        }
        self.request_next_page(cx);
        self.start_poll(cx);
        cx.notify();
    }

    fn close_dropdown(&mut self, cx: &mut Context<Self>) {
        self.open = false;
        self.open_generation += 1;
        self.search_text.clear();
        if let Some(handler) = &self.on_toggle {
            handler(false, cx);
        }
        cx.notify();
    }

    /// Option row clicked
    pub fn toggle_option(&mut self, option: &SelectionOption, cx: &mut Context<Self>) {
        if !self.multi_select {
            let change = self.selection.select_single(option);
            if let Some(handler) = &self.on_single {
                handler(option, cx);
            }
            if let Some(handler) = &self.on_change {
                handler(&change, cx);
            }
            self.close_dropdown(cx);
            return;
        }
        let visible = self.visible_options();
        self.selection.toggle(option, &visible);
        cx.notify();
    }

    /// Header "All" checkbox clicked
    pub fn toggle_all_options(&mut self, cx: &mut Context<Self>) {
        let visible = self.visible_options();
        self.selection.toggle_all(&visible);
        cx.notify();
    }

    /// Commit the working copy
    pub fn apply(&mut self, cx: &mut Context<Self>) {
        let change = self.selection.apply(self.catalog.total_count());
        if let Some(handler) = &self.on_change {
            handler(&change, cx);
        }
        self.close_dropdown(cx);
    }

    /// Discard the working copy; no emission, no network
    pub fn cancel(&mut self, cx: &mut Context<Self>) {
        self.selection.cancel();
        self.close_dropdown(cx);
    }

    /// Chip removed directly from the closed field
    pub fn remove_chip(&mut self, id: &str, cx: &mut Context<Self>) {
        if let Some(change) = self.selection.remove_chip(id) {
            if let Some(handler) = &self.on_change {
                handler(&change, cx);
            }
            cx.notify();
        }
    }

    /// Search text changed. Static fields filter locally on render;
    /// catalog-backed fields invalidate the catalog and reload, debounced
    /// so only the last value within the window hits the backend.
    pub fn set_search(&mut self, text: impl Into<String>, cx: &mut Context<Self>) {
        self.search_text = text.into();
        if self.virtual_scroll {
            let ticket = self.search_debounce.arm();
            cx.spawn(async move |this, cx| {
                runtime::run_in_tokio(async {
                    tokio::time::sleep(std::time::Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
                })
                .await;
                let _ = cx.update(|cx| {
                    if let Some(field) = this.upgrade() {
                        field.update(cx, |field, cx| {
                            if !field.search_debounce.is_current(ticket) {
                                return;
                            }
                            let term = field.search_text.clone();
                            if field.catalog.set_search_term(&term) {
                                field.request_next_page(cx);
                                cx.notify();
                            }
                        });
                    }
                });
            })
            .detach();
        }
        cx.notify();
    }

    // ---- paging -----------------------------------------------------------

    fn request_next_page(&mut self, cx: &mut Context<Self>) {
        if let Some(request) = self.catalog.next_page_request() {
            if let Some(handler) = &self.on_load_more {
                handler(request, cx);
            }
        }
    }

    /// Periodic readiness check while the dropdown is open. The task
    /// stops when the dropdown closes (generation bump), the entity is
    /// dropped, or every item is loaded.
    fn start_poll(&mut self, cx: &mut Context<Self>) {
        if self.catalog.is_fully_loaded() {
            return;
        }
        let generation = self.open_generation;
        cx.spawn(async move |this, cx| {
            loop {
                runtime::run_in_tokio(async {
                    tokio::time::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS)).await;
                })
                .await;
                let keep_going = cx
                    .update(|cx| match this.upgrade() {
                        Some(field) => {
                            field.update(cx, |field, cx| field.poll_tick(generation, cx))
                        }
                        None => false,
                    })
                    .unwrap_or(false);
                if !keep_going {
                    break;
                }
            }
        })
        .detach();
    }

    fn poll_tick(&mut self, generation: u64, cx: &mut Context<Self>) -> bool {
        if !self.open || generation != self.open_generation {
            return false;
        }
        self.request_next_page(cx);
        !self.catalog.is_fully_loaded()
    }

    /// Options shown in the open dropdown
    fn visible_options(&self) -> Vec<SelectionOption> {
        if self.virtual_scroll {
            return self.catalog.items().to_vec();
        }
        let needle = self.search_text.to_lowercase();
        if needle.trim().is_empty() {
            return self.catalog.items().to_vec();
        }
        self.catalog
            .items()
            .iter()
            .filter(|o| {
                o.text.to_lowercase().contains(&needle) || o.id.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    // ---- rendering --------------------------------------------------------

    fn render_chips(&mut self, cx: &mut Context<Self>) -> gpui::AnyElement {
        let chips_data = self.selection.visible_chips(&self.all_options_text);
        let budget = (self.available_width - ACTIONS_WIDTH).max(0.0);
        let widths: Vec<f32> = chips_data
            .iter()
            .map(|c| chips::estimate_chip_width(&c.text))
            .collect();
        let fit = chips::max_chips_that_fit(&widths, budget, chips::CHIP_GAP);
        let hidden = chips_data.len().saturating_sub(fit);

        let mut row = div().flex().items_center().gap_1().flex_1().overflow_hidden();

        if chips_data.is_empty() {
            row = row.child(
                div()
                    .text_sm()
                    .text_color(CtrColors::input_placeholder())
                    .child(self.placeholder.clone()),
            );
        } else {
            for chip in chips_data.into_iter().take(fit) {
                let chip_id = chip.id.clone();
                row = row.child(
                    Chip::new(
                        SharedString::from(format!("{}-chip-{}", self.label, chip.id)),
                        chip.text.clone(),
                    )
                    .on_remove(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        cx.stop_propagation();
                        this.remove_chip(&chip_id, cx);
                    })),
                );
            }
            if hidden > 0 {
                row = row.child(
                    div()
                        .text_size(px(12.0))
                        .text_color(CtrColors::text_secondary())
                        .child(format!("+{hidden} more")),
                );
            }
        }

        row.into_any_element()
    }

    fn render_option_row(
        &self,
        index: usize,
        option: &SelectionOption,
        cx: &mut Context<Self>,
    ) -> gpui::AnyElement {
        let selected = self.selection.is_pending(&option.id);
        let opt = option.clone();

        let mut row = div()
            .id(("ms-option", index))
            .px_3()
            .py_2()
            .flex()
            .items_center()
            .gap_2()
            .cursor_pointer()
            .hover(|s| s.bg(CtrColors::table_row_hover()))
            .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                this.toggle_option(&opt, cx);
            }));

        if self.multi_select {
            row = row.child(
                Checkbox::new(("ms-option-check", index))
                    .checked(selected),
            );
        }

        row.child(
            div()
                .text_sm()
                .text_color(CtrColors::text_primary())
                .child(option.text.clone()),
        )
        .into_any_element()
    }

    fn render_dropdown(&mut self, cx: &mut Context<Self>) -> gpui::AnyElement {
        let visible = self.visible_options();
        let loading = self.catalog.is_loading();
        let has_error = self.catalog.has_error();
        let pending_all = self.selection.pending_all();
        let indeterminate =
            !self.selection.pending().is_empty() && !pending_all && self.multi_select;

        let mut panel = div()
            .absolute()
            .top(px(64.0))
            .left_0()
            .right_0()
            .bg(CtrColors::content_bg())
            .border_1()
            .border_color(CtrColors::border())
            .rounded_md()
            .shadow_lg()
            .flex()
            .flex_col();

        // Search box (text is driven by the owning page)
        if !self.search_text.is_empty() {
            panel = panel.child(
                div()
                    .px_3()
                    .py_2()
                    .border_b_1()
                    .border_color(CtrColors::border())
                    .text_sm()
                    .text_color(CtrColors::text_secondary())
                    .child(format!("Search: {}", self.search_text)),
            );
        }

        // "All" header row
        if self.multi_select {
            panel = panel.child(
                div()
                    .id("ms-all-row")
                    .px_3()
                    .py_2()
                    .flex()
                    .items_center()
                    .gap_2()
                    .border_b_1()
                    .border_color(CtrColors::border())
                    .cursor_pointer()
                    .hover(|s| s.bg(CtrColors::table_row_hover()))
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.toggle_all_options(cx);
                    }))
                    .child(
                        Checkbox::new("ms-all-check")
                            .checked(pending_all)
                            .indeterminate(indeterminate),
                    )
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::MEDIUM)
                            .text_color(CtrColors::text_primary())
                            .child(self.all_options_text.clone()),
                    ),
            );
        }

        // Option list
        let mut list = div()
            .id(SharedString::from(format!("{}-ms-list", self.label)))
            .flex()
            .flex_col()
            .max_h(px(280.0))
            .overflow_y_scroll();

        if visible.is_empty() && !loading {
            list = list.child(
                div()
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::text_muted())
                    .child("No options"),
            );
        } else {
            for (index, option) in visible.iter().enumerate() {
                list = list.child(self.render_option_row(index, option, cx));
            }
        }

        if loading {
            list = list.child(
                div()
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::text_muted())
                    .child("Loading..."),
            );
        }
        if has_error {
            list = list.child(
                div()
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::danger())
                    .child("Failed to load options"),
            );
        }
        panel = panel.child(list);

        // Apply/Cancel footer (multi mode only)
        if self.multi_select {
            panel = panel.child(
                div()
                    .px_3()
                    .py_2()
                    .border_t_1()
                    .border_color(CtrColors::border())
                    .flex()
                    .items_center()
                    .justify_end()
                    .gap_2()
                    .child(
                        div()
                            .id("ms-cancel")
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .cursor_pointer()
                            .hover(|s| s.bg(CtrColors::table_row_hover()))
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.cancel(cx);
                            }))
                            .child("Cancel"),
                    )
                    .child(
                        div()
                            .id("ms-apply")
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .text_sm()
                            .bg(CtrColors::button_primary_bg())
                            .text_color(CtrColors::button_primary_text())
                            .cursor_pointer()
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.apply(cx);
                            }))
                            .child("Apply"),
                    ),
            );
        }

        panel.into_any_element()
    }
}

impl Render for MultiSelectField {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let opacity = if self.disabled { 0.5 } else { 1.0 };

        let mut field = div()
            .relative()
            .flex()
            .flex_col()
            .gap_1()
            .opacity(opacity)
            // Label
            .child(
                div()
                    .text_size(px(12.0))
                    .text_color(CtrColors::text_secondary())
                    .child(self.label.clone()),
            )
            // Input row
            .child(
                div()
                    .id(self.id.clone())
                    .px_3()
                    .py_2()
                    .bg(CtrColors::input_bg())
                    .border_1()
                    .border_color(if self.open {
                        CtrColors::border_focus()
                    } else {
                        CtrColors::input_border()
                    })
                    .rounded_md()
                    .flex()
                    .items_center()
                    .justify_between()
                    .gap_2()
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.toggle_dropdown(cx);
                    }))
                    .child(self.render_chips(cx))
                    .child(
                        div()
                            .text_color(CtrColors::text_muted())
                            .text_size(px(10.0))
                            .child("▼"),
                    ),
            );

        if let Some(message) = &self.validation_message {
            field = field.child(
                div()
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .bg(CtrColors::alert_validation_bg())
                    .text_size(px(12.0))
                    .text_color(CtrColors::warning())
                    .child(message.clone()),
            );
        }

        if self.open {
            field = field.child(self.render_dropdown(cx));
        }

        field
    }
}
