//! Modal Component
//!
//! A modal dialog with an optional confirm/cancel footer, used for the
//! destructive-action and registration-email confirmations.

use gpui::{
    div, prelude::*, px, App, ClickEvent, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::components::primitives::button::Button;
use crate::theme::colors::CtrColors;

/// Modal component
#[derive(IntoElement)]
pub struct Modal {
    title: SharedString,
    children: Vec<gpui::AnyElement>,
    on_close: Option<std::rc::Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    on_confirm: Option<std::rc::Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    confirm_label: SharedString,
    cancel_label: SharedString,
    confirm_loading: bool,
    show_close_button: bool,
}

impl Modal {
    /// Create a new modal
    pub fn new(title: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
            on_close: None,
            on_confirm: None,
            confirm_label: "Confirm".into(),
            cancel_label: "Cancel".into(),
            confirm_loading: false,
            show_close_button: true,
        }
    }

    /// Add a child element
    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }

    /// Set the close/cancel handler
    pub fn on_close(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(std::rc::Rc::new(handler));
        self
    }

    /// Add a confirm footer with the given handler
    pub fn on_confirm(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_confirm = Some(std::rc::Rc::new(handler));
        self
    }

    /// Set the footer button labels
    pub fn labels(
        mut self,
        confirm: impl Into<SharedString>,
        cancel: impl Into<SharedString>,
    ) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Show the confirm button in its loading state
    pub fn confirm_loading(mut self, loading: bool) -> Self {
        self.confirm_loading = loading;
        self
    }

    /// Hide the close button
    pub fn hide_close_button(mut self) -> Self {
        self.show_close_button = false;
        self
    }
}

impl RenderOnce for Modal {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let on_close = self.on_close;
        let on_confirm = self.on_confirm;
        let close_for_button = on_close.clone();
        let close_for_footer = on_close;

        // Backdrop
        div()
            .absolute()
            .inset_0()
            .bg(gpui::rgba(0x00000088))
            .flex()
            .items_center()
            .justify_center()
            .child(
                // Modal container
                div()
                    .bg(CtrColors::content_bg())
                    .rounded_lg()
                    .shadow_lg()
                    .min_w(px(400.0))
                    .max_w(px(600.0))
                    .flex()
                    .flex_col()
                    // Header
                    .child(
                        div()
                            .px_6()
                            .py_4()
                            .border_b_1()
                            .border_color(CtrColors::border())
                            .flex()
                            .items_center()
                            .justify_between()
                            .child(
                                div()
                                    .text_size(px(16.0))
                                    .font_weight(gpui::FontWeight::SEMIBOLD)
                                    .text_color(CtrColors::text_primary())
                                    .child(self.title),
                            )
                            .when(self.show_close_button, |el| {
                                el.child(
                                    div()
                                        .id("modal-close")
                                        .size(px(24.0))
                                        .rounded_sm()
                                        .flex()
                                        .items_center()
                                        .justify_center()
                                        .text_color(CtrColors::text_muted())
                                        .text_size(px(16.0))
                                        .cursor_pointer()
                                        .hover(|s| s.bg(CtrColors::table_row_hover()))
                                        .when_some(close_for_button, |el, handler| {
                                            el.on_click(move |event: &ClickEvent, window, cx| {
                                                handler(event, window, cx);
                                            })
                                        })
                                        .child("×"),
                                )
                            }),
                    )
                    // Content
                    .child(
                        div()
                            .px_6()
                            .py_4()
                            .flex()
                            .flex_col()
                            .gap_4()
                            .children(self.children),
                    )
                    // Footer
                    .when_some(on_confirm, |el, confirm| {
                        el.child(
                            div()
                                .px_6()
                                .py_4()
                                .border_t_1()
                                .border_color(CtrColors::border())
                                .flex()
                                .items_center()
                                .justify_end()
                                .gap_2()
                                .when_some(close_for_footer, |el, close| {
                                    let label = self.cancel_label.clone();
                                    el.child(Button::secondary("modal-cancel", label).on_click(
                                        move |event, window, cx| {
                                            close(event, window, cx);
                                        },
                                    ))
                                })
                                .child(
                                    Button::primary("modal-confirm", self.confirm_label.clone())
                                        .loading(self.confirm_loading)
                                        .on_click(move |event, window, cx| {
                                            confirm(event, window, cx);
                                        }),
                                ),
                        )
                    }),
            )
    }
}
