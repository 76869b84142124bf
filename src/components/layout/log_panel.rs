//! LogPanel Component
//!
//! Collapsible activity log strip at the bottom of the workspace.

use gpui::{
    div, prelude::*, px, ClickEvent, Context, InteractiveElement, IntoElement, ParentElement,
    Render, StatefulInteractiveElement, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::i18n::t;
use crate::theme::colors::CtrColors;
use crate::utils::format::format_time;

/// Number of entries shown while the panel is expanded
const VISIBLE_ENTRIES: usize = 8;

/// Log panel component
pub struct LogPanel {
    entities: AppEntities,
    expanded: bool,
}

impl LogPanel {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&entities.logs, |_this, _, cx| cx.notify())
            .detach();
        cx.observe(&entities.i18n, |_this, _, cx| cx.notify())
            .detach();

        Self {
            entities,
            expanded: false,
        }
    }
}

impl Render for LogPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let logs = self.entities.logs.read(cx);
        let count = logs.len();
        let latest = logs.entries().back().cloned();
        let entries: Vec<_> = if self.expanded {
            logs.entries()
                .iter()
                .rev()
                .take(VISIBLE_ENTRIES)
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        let title = t(locale, "log-title");
        let expanded = self.expanded;

        let mut panel = div()
            .w_full()
            .bg(CtrColors::log_panel_bg())
            .flex()
            .flex_col()
            // Title row, click to expand/collapse
            .child(
                div()
                    .id("log-panel-toggle")
                    .h(px(28.0))
                    .px_4()
                    .flex()
                    .items_center()
                    .justify_between()
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.expanded = !this.expanded;
                        cx.notify();
                    }))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(
                                div()
                                    .text_size(px(12.0))
                                    .text_color(CtrColors::text_light())
                                    .child(format!("{title} ({count})")),
                            )
                            .when_some(latest, |el, entry| {
                                el.child(
                                    div()
                                        .text_size(px(12.0))
                                        .text_color(entry.level.color())
                                        .child(format!(
                                            "{} [{}] {}",
                                            format_time(&entry.timestamp),
                                            entry.level.label(),
                                            entry.message
                                        )),
                                )
                            }),
                    )
                    .child(
                        div()
                            .text_size(px(10.0))
                            .text_color(CtrColors::text_muted())
                            .child(if expanded { "▼" } else { "▲" }),
                    ),
            );

        if expanded {
            let mut list = div()
                .id("log-panel-entries")
                .max_h(px(180.0))
                .overflow_y_scroll()
                .px_4()
                .pb_2()
                .flex()
                .flex_col();
            for entry in entries {
                list = list.child(
                    div()
                        .flex()
                        .items_center()
                        .gap_2()
                        .text_size(px(12.0))
                        .child(
                            div()
                                .text_color(CtrColors::text_muted())
                                .child(format_time(&entry.timestamp)),
                        )
                        .child(
                            div()
                                .text_color(entry.level.color())
                                .child(entry.level.label()),
                        )
                        .child(
                            div()
                                .text_color(CtrColors::text_light())
                                .child(entry.message.clone()),
                        ),
                );
            }
            panel = panel.child(list);
        }

        panel
    }
}
