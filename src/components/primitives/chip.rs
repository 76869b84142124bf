//! Chip Component
//!
//! One selected option rendered as a removable token.

use gpui::{
    div, px, App, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::theme::colors::CtrColors;

/// A removable selection chip
#[derive(IntoElement)]
pub struct Chip {
    id: ElementId,
    label: SharedString,
    removable: bool,
    on_remove: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Chip {
    /// Create a new chip
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            removable: true,
            on_remove: None,
        }
    }

    /// Hide the remove glyph
    pub fn not_removable(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Set the remove handler
    pub fn on_remove(mut self, handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static) -> Self {
        self.on_remove = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Chip {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let mut chip = div()
            .id(self.id)
            .flex()
            .items_center()
            .gap_1()
            .px_2()
            .py_1()
            .rounded_md()
            .bg(CtrColors::chip_bg())
            .text_color(CtrColors::chip_text())
            .text_size(px(12.0))
            .child(self.label);

        if self.removable {
            let on_remove = self.on_remove;
            chip = chip.child(
                div()
                    .text_size(px(11.0))
                    .text_color(CtrColors::chip_text())
                    .cursor_pointer()
                    .child("✕"),
            );
            if let Some(handler) = on_remove {
                chip = chip.on_click(handler);
            }
        }

        chip
    }
}
