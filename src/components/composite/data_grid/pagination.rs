//! Pagination Component
//!
//! Page navigation for the DataGrid.

use gpui::{
    div, prelude::*, App, ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::theme::colors::CtrColors;

/// Pagination component
#[derive(IntoElement)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
    total_items: usize,
    items_label: SharedString,
    on_page_change: Option<std::rc::Rc<dyn Fn(u32, &mut App) + 'static>>,
}

impl Pagination {
    /// Create a new pagination component
    pub fn new(current_page: u32, page_size: u32, total_items: usize) -> Self {
        let total_pages = if page_size == 0 {
            1
        } else {
            ((total_items as u32).div_ceil(page_size)).max(1)
        };
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
            total_items,
            items_label: "items".into(),
            on_page_change: None,
        }
    }

    /// Set the items label
    pub fn items_label(mut self, label: impl Into<SharedString>) -> Self {
        self.items_label = label.into();
        self
    }

    /// Set the page change handler
    pub fn on_page_change(mut self, handler: impl Fn(u32, &mut App) + 'static) -> Self {
        self.on_page_change = Some(std::rc::Rc::new(handler));
        self
    }
}

impl RenderOnce for Pagination {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let current = self.current_page;
        let total = self.total_pages;
        let can_prev = current > 1;
        let can_next = current < total;

        let prev_handler = self.on_page_change.clone();
        let next_handler = self.on_page_change;

        div()
            .w_full()
            .px_4()
            .py_2()
            .flex()
            .items_center()
            .justify_between()
            .border_t_1()
            .border_color(CtrColors::border())
            // Item count
            .child(
                div()
                    .text_sm()
                    .text_color(CtrColors::text_secondary())
                    .child(format!("{} {}", self.total_items, self.items_label)),
            )
            // Page navigation
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    // Previous button
                    .child({
                        let mut btn = div()
                            .id("prev-page")
                            .px_2()
                            .py_1()
                            .rounded_sm()
                            .text_sm()
                            .text_color(if can_prev {
                                CtrColors::text_primary()
                            } else {
                                CtrColors::text_muted()
                            })
                            .child("←");

                        if can_prev {
                            btn = btn
                                .cursor_pointer()
                                .hover(|s| s.bg(CtrColors::table_row_hover()));
                            if let Some(handler) = prev_handler {
                                btn = btn.on_click(move |_event: &ClickEvent, _window, cx| {
                                    handler(current - 1, cx);
                                });
                            }
                        }

                        btn
                    })
                    // Page info
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_primary())
                            .child(format!("{current} / {total}")),
                    )
                    // Next button
                    .child({
                        let mut btn = div()
                            .id("next-page")
                            .px_2()
                            .py_1()
                            .rounded_sm()
                            .text_sm()
                            .text_color(if can_next {
                                CtrColors::text_primary()
                            } else {
                                CtrColors::text_muted()
                            })
                            .child("→");

                        if can_next {
                            btn = btn
                                .cursor_pointer()
                                .hover(|s| s.bg(CtrColors::table_row_hover()));
                            if let Some(handler) = next_handler {
                                btn = btn.on_click(move |_event: &ClickEvent, _window, cx| {
                                    handler(current + 1, cx);
                                });
                            }
                        }

                        btn
                    }),
            )
    }
}
