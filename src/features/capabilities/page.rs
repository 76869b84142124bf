//! Capabilities Page
//!
//! Flat capability table with per-column filters. The view is restored
//! from the config store on construction and persisted on every change.

use gpui::{
    div, prelude::*, ClickEvent, Context, Entity, IntoElement, ParentElement, Render, Styled,
    Window,
};

use crate::app::entities::AppEntities;
use crate::components::composite::data_grid::{ColumnSpec, DataGrid, Pagination};
use crate::components::primitives::button::{Button, ButtonSize};
use crate::components::primitives::text_input::{text_input, TextInput};
use crate::domain::capability::Capability;
use crate::features::capabilities::controller::{CapabilitiesController, CapabilityFilterField};
use crate::i18n::{t, Locale};
use crate::state::capabilities_state::CAPABILITY_PAGE_SIZE;
use crate::theme::colors::CtrColors;

/// Capabilities page component
pub struct CapabilitiesPage {
    entities: AppEntities,
    controller: CapabilitiesController,
    grid: Entity<DataGrid<Capability>>,
    search_input: Entity<TextInput>,
    name_input: Entity<TextInput>,
    url_input: Entity<TextInput>,
}

impl CapabilitiesPage {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        let controller = CapabilitiesController::new(entities.clone());
        let locale = entities.i18n.read(cx).locale;

        let grid = cx.new(|cx| {
            let mut grid = DataGrid::<Capability>::new(cx);
            grid.set_columns(Self::create_columns(locale));
            grid.set_keyed(true);
            grid.set_empty_message(t(locale, "table-no-data"));
            grid
        });
        {
            let controller = controller.clone();
            grid.update(cx, |grid, _cx| {
                grid.on_sort(move |event, cx| {
                    controller.sort_changed(event, cx);
                });
            });
        }

        let search_input = Self::filter_input(
            "capability-search",
            CapabilityFilterField::Search,
            &controller,
            cx,
        );
        let name_input = Self::filter_input(
            "capability-name-filter",
            CapabilityFilterField::CapabilityName,
            &controller,
            cx,
        );
        let url_input = Self::filter_input(
            "capability-url-filter",
            CapabilityFilterField::Url,
            &controller,
            cx,
        );

        let grid_clone = grid.clone();
        cx.observe(&entities.capabilities, move |_this, capabilities, cx| {
            let (rows, loading) = {
                let state = capabilities.read(cx);
                (state.rows.clone(), state.loading)
            };
            grid_clone.update(cx, |grid, cx| {
                grid.set_rows(rows);
                grid.set_loading(loading);
                cx.notify();
            });
            cx.notify();
        })
        .detach();

        let grid_clone = grid.clone();
        cx.observe(&entities.i18n, move |_this, i18n, cx| {
            let locale = i18n.read(cx).locale;
            grid_clone.update(cx, |grid, cx| {
                grid.set_columns(CapabilitiesPage::create_columns(locale));
                cx.notify();
            });
            cx.notify();
        })
        .detach();

        // Restore the persisted view and fetch it
        controller.restore_view(cx);

        Self {
            entities,
            controller,
            grid,
            search_input,
            name_input,
            url_input,
        }
    }

    fn filter_input(
        id: &'static str,
        field: CapabilityFilterField,
        controller: &CapabilitiesController,
        cx: &mut Context<Self>,
    ) -> Entity<TextInput> {
        let input = text_input(id, "", "", cx);
        let controller = controller.clone();
        input.update(cx, |input, _cx| {
            input.on_change(move |value, cx| {
                controller.set_filter(field, value.to_string(), cx);
            });
        });
        input
    }

    fn create_columns(locale: Locale) -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("capabilityName", t(locale, "col-capability-name"))
                .sortable()
                .sort_field("CapabilityName")
                .flex_width(Some(260.0), None),
            ColumnSpec::new("url", t(locale, "col-url"))
                .sortable()
                .sort_field("URL")
                .flex_width(Some(260.0), None),
            ColumnSpec::action(t(locale, "col-action")),
        ]
    }
}

impl Render for CapabilitiesPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let (page, total) = {
            let state = self.entities.capabilities.read(cx);
            (state.page, state.total)
        };

        div()
            .size_full()
            .flex()
            .flex_col()
            .p_4()
            .gap_3()
            .child(
                div()
                    .w_full()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .child(t(locale, "nav-capabilities")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(format!("{total} total")),
                    ),
            )
            .child(
                div()
                    .w_full()
                    .flex()
                    .flex_wrap()
                    .items_end()
                    .gap_2()
                    .child(self.search_input.clone())
                    .child(self.name_input.clone())
                    .child(self.url_input.clone())
                    .child(
                        Button::ghost("capability-clear", t(locale, "action-clear"))
                            .size(ButtonSize::Small)
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.controller.clear_filters(cx);
                            })),
                    )
                    .child(
                        Button::secondary("capability-refresh", t(locale, "action-refresh"))
                            .size(ButtonSize::Small)
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.controller.load(cx);
                            })),
                    ),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .child(self.grid.clone()),
            )
            .child({
                let controller = self.controller.clone();
                Pagination::new(page, CAPABILITY_PAGE_SIZE, total)
                    .items_label(t(locale, "nav-capabilities"))
                    .on_page_change(move |page, cx| {
                        controller.set_page(page, cx);
                    })
            })
    }
}
