//! Alert Toast Component
//!
//! Transient success/failure banner shown at the top of a page. Dismissal
//! timing is owned by `state::alert_state`; this component only renders
//! the current alert and forwards the manual close.

use gpui::{
    div, prelude::*, px, App, ClickEvent, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::state::alert_state::AlertKind;
use crate::theme::colors::CtrColors;

/// Alert toast
#[derive(IntoElement)]
pub struct Alert {
    kind: AlertKind,
    title: SharedString,
    subtitle: SharedString,
    on_close: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        title: impl Into<SharedString>,
        subtitle: impl Into<SharedString>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            on_close: None,
        }
    }

    /// Set the manual close handler
    pub fn on_close(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Alert {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let (bg, accent, icon) = match self.kind {
            AlertKind::Success => (CtrColors::alert_success_bg(), CtrColors::success(), "✓"),
            AlertKind::Error => (CtrColors::alert_error_bg(), CtrColors::danger(), "!"),
        };

        div()
            .w_full()
            .px_4()
            .py_3()
            .rounded_md()
            .bg(bg)
            .border_1()
            .border_color(accent)
            .flex()
            .items_center()
            .gap_3()
            .child(
                div()
                    .size(px(20.0))
                    .rounded_full()
                    .bg(accent)
                    .flex()
                    .items_center()
                    .justify_center()
                    .text_color(CtrColors::text_light())
                    .text_size(px(12.0))
                    .child(icon),
            )
            .child(
                div()
                    .flex_1()
                    .flex()
                    .flex_col()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(CtrColors::text_primary())
                            .child(self.title),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(self.subtitle),
                    ),
            )
            .when_some(self.on_close, |el, handler| {
                el.child(
                    div()
                        .id("alert-close")
                        .text_color(CtrColors::text_muted())
                        .cursor_pointer()
                        .on_click(handler)
                        .child("×"),
                )
            })
    }
}
