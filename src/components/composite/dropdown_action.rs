//! Dropdown Action Menu
//!
//! A small action menu anchored under a toolbar button ("Add User",
//! "More Actions"). Items may carry children, rendered as an indented
//! group; only leaf items fire the select handler.

use gpui::{
    div, prelude::*, px, App, ClickEvent, ElementId, InteractiveElement, IntoElement,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window,
};

use crate::theme::colors::CtrColors;

/// One menu entry
#[derive(Debug, Clone)]
pub struct DropdownActionItem {
    /// Value reported on click
    pub value: SharedString,
    /// Display text
    pub text: SharedString,
    pub disabled: bool,
    /// Child entries; a parent with children is a group header
    pub children: Vec<DropdownActionItem>,
}

impl DropdownActionItem {
    pub fn new(value: impl Into<SharedString>, text: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DropdownActionItem>) -> Self {
        self.children = children;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The anchored menu panel
#[derive(IntoElement)]
pub struct DropdownAction {
    id: ElementId,
    items: Vec<DropdownActionItem>,
    width: f32,
    on_select: Option<std::rc::Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
}

impl DropdownAction {
    pub fn new(id: impl Into<ElementId>, items: Vec<DropdownActionItem>) -> Self {
        Self {
            id: id.into(),
            items,
            width: 216.0,
            on_select: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Handler invoked with the clicked leaf item's value
    pub fn on_select(
        mut self,
        handler: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_select = Some(std::rc::Rc::new(handler));
        self
    }

    fn render_leaf(
        item: &DropdownActionItem,
        indent: bool,
        on_select: Option<std::rc::Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
    ) -> gpui::AnyElement {
        let value = item.value.clone();
        let disabled = item.disabled;

        let mut row = div()
            .id(ElementId::Name(item.value.clone()))
            .px_3()
            .py_2()
            .text_sm()
            .text_color(if disabled {
                CtrColors::text_muted()
            } else {
                CtrColors::text_primary()
            })
            .child(item.text.clone());

        if indent {
            row = row.pl_6();
        }

        if !disabled {
            row = row
                .cursor_pointer()
                .hover(|s| s.bg(CtrColors::table_row_hover()));
            if let Some(handler) = on_select {
                row = row.on_click(move |_event: &ClickEvent, window, cx| {
                    handler(&value, window, cx);
                });
            }
        }

        row.into_any_element()
    }
}

impl RenderOnce for DropdownAction {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let on_select = self.on_select;

        let mut menu = div()
            .id(self.id)
            .absolute()
            .top(px(36.0))
            .right_0()
            .w(px(self.width))
            .bg(CtrColors::content_bg())
            .border_1()
            .border_color(CtrColors::border())
            .rounded_md()
            .shadow_lg()
            .flex()
            .flex_col()
            .py_1();

        for item in &self.items {
            if item.children.is_empty() {
                menu = menu.child(Self::render_leaf(item, false, on_select.clone()));
            } else {
                menu = menu.child(
                    div()
                        .px_3()
                        .py_2()
                        .text_sm()
                        .text_color(CtrColors::text_secondary())
                        .child(item.text.clone()),
                );
                for child in &item.children {
                    menu = menu.child(Self::render_leaf(child, true, on_select.clone()));
                }
            }
        }

        menu
    }
}
