//! Header Component
//!
//! The application header with logo, title, and language switcher.

use gpui::{
    div, px, ClickEvent, Context, InteractiveElement, IntoElement, ParentElement, Render,
    StatefulInteractiveElement, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::i18n::t;
use crate::theme::colors::CtrColors;

/// Header component
pub struct Header {
    entities: AppEntities,
}

impl Header {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        // Observe i18n changes
        cx.observe(&entities.i18n, |_this, _, cx| cx.notify())
            .detach();

        Self { entities }
    }
}

impl Render for Header {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let title = t(locale, "app-title");
        let lang_label = locale.display_name();

        let entities = self.entities.clone();

        div()
            .h(px(48.0))
            .w_full()
            .bg(CtrColors::header_bg())
            .flex()
            .items_center()
            .justify_between()
            .px_4()
            // Left side: Logo and title
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_3()
                    // Logo placeholder
                    .child(
                        div()
                            .size(px(32.0))
                            .rounded_md()
                            .bg(gpui::rgba(0xffffffcc))
                            .flex()
                            .items_center()
                            .justify_center()
                            .text_color(CtrColors::header_bg())
                            .font_weight(gpui::FontWeight::BOLD)
                            .child("C"),
                    )
                    .child(
                        div()
                            .text_color(CtrColors::text_header())
                            .text_size(px(18.0))
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .child(title),
                    ),
            )
            // Right side: language switcher
            .child(
                div()
                    .id("lang-switcher")
                    .px_3()
                    .py_1()
                    .rounded_md()
                    .bg(gpui::rgba(0xffffff22))
                    .text_color(CtrColors::text_header())
                    .text_size(px(13.0))
                    .cursor_pointer()
                    .hover(|s| s.bg(gpui::rgba(0xffffff44)))
                    .on_click(move |_event: &ClickEvent, _window, cx| {
                        entities.i18n.update(cx, |i18n, cx| {
                            i18n.toggle_locale();
                            cx.notify();
                        });
                    })
                    .child(lang_label),
            )
    }
}
