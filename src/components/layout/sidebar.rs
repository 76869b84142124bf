//! Sidebar Component
//!
//! Navigation sidebar with page links.

use gpui::{
    div, prelude::*, px, ClickEvent, Context, InteractiveElement, IntoElement, ParentElement,
    Render, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::app::navigation::ActivePage;
use crate::i18n::{t, Locale};
use crate::theme::colors::CtrColors;

/// Sidebar component
pub struct Sidebar {
    entities: AppEntities,
}

impl Sidebar {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        // Observe i18n changes
        cx.observe(&entities.i18n, |_this, _, cx| cx.notify())
            .detach();

        // Observe tabs changes
        cx.observe(&entities.tabs, |_this, _, cx| cx.notify())
            .detach();

        Self { entities }
    }

    fn render_nav_item(
        &self,
        page: ActivePage,
        locale: Locale,
        active_page: ActivePage,
    ) -> gpui::AnyElement {
        let is_active = page == active_page;
        let label = t(locale, page.title_key());
        let entities = self.entities.clone();

        let bg_color = if is_active {
            gpui::rgba(0x0f766e22)
        } else {
            gpui::rgba(0x00000000)
        };

        let text_color = if is_active {
            CtrColors::header_bg()
        } else {
            CtrColors::text_secondary()
        };

        let border_color = if is_active {
            CtrColors::header_bg()
        } else {
            gpui::rgba(0x00000000)
        };

        div()
            .id(SharedString::from(format!("nav-{page:?}")))
            .w_full()
            .px_4()
            .py_2()
            .bg(bg_color)
            .border_l_2()
            .border_color(border_color)
            .text_color(text_color)
            .text_size(px(14.0))
            .cursor_pointer()
            .hover(|s| s.bg(gpui::rgba(0x0f766e11)))
            .on_click(move |_event: &ClickEvent, _window, cx| {
                entities.tabs.update(cx, |tabs, cx| {
                    tabs.set_active_page(page);
                    cx.notify();
                });
            })
            .child(label)
            .into_any_element()
    }
}

impl Render for Sidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let active_page = self.entities.tabs.read(cx).active_page;

        div()
            .w(px(180.0))
            .h_full()
            .bg(CtrColors::sidebar_bg())
            .border_r_1()
            .border_color(CtrColors::border())
            .flex()
            .flex_col()
            .pt_4()
            .children(
                ActivePage::all()
                    .iter()
                    .map(|page| self.render_nav_item(*page, locale, active_page)),
            )
    }
}
