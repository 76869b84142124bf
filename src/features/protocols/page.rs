//! Protocols Page
//!
//! Left: the lazily-paged activated-protocol list. Right: the selected
//! protocol's associated users in a DataGrid with column filters, plus
//! the Add User / Registration Email actions.

use gpui::{
    div, prelude::*, px, ClickEvent, Context, Entity, IntoElement, ParentElement, Render,
    SharedString, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::components::composite::alert::Alert;
use crate::components::composite::data_grid::{ColumnSpec, DataGrid, Pagination, SortDirection};
use crate::components::composite::dropdown_action::{DropdownAction, DropdownActionItem};
use crate::components::composite::modal::Modal;
use crate::components::composite::multi_select::MultiSelectField;
use crate::components::primitives::button::Button;
use crate::components::primitives::text_input::{text_input, TextInput};
use crate::domain::selection::SelectionOption;
use crate::domain::user::AssociatedUser;
use crate::features::fetch_protocol_options;
use crate::features::protocols::controller::{ProtocolsController, UserFilterField};
use crate::i18n::{t, Locale};
use crate::state::protocols_state::USER_PAGE_SIZE;
use crate::theme::colors::CtrColors;

/// Protocols page component
pub struct ProtocolsPage {
    entities: AppEntities,
    controller: ProtocolsController,
    grid: Entity<DataGrid<AssociatedUser>>,
    search_input: Entity<TextInput>,
    email_input: Entity<TextInput>,
    first_name_input: Entity<TextInput>,
    last_name_input: Entity<TextInput>,
    role_field: Entity<MultiSelectField>,
    region_field: Entity<MultiSelectField>,
    country_field: Entity<MultiSelectField>,
    site_field: Entity<MultiSelectField>,
    status_field: Entity<MultiSelectField>,
    copy_protocol_field: Entity<MultiSelectField>,
    /// (regions, countries, sites) lengths last pushed into the fields
    options_signature: (usize, usize, usize),
    show_add_menu: bool,
    show_more_menu: bool,
    show_copy_modal: bool,
    show_send_confirm: bool,
    show_resend_confirm: bool,
}

/// Built-in role filter options
fn role_options() -> Vec<SelectionOption> {
    [
        "Sponsor Contact",
        "CRO Contact",
        "Medical Monitor",
        "CRA",
        "External User - Other",
        "Internal User - Other",
        "Reporting Admin",
    ]
    .into_iter()
    .map(|role| SelectionOption::new(role, role))
    .collect()
}

/// Built-in status filter options
fn status_options() -> Vec<SelectionOption> {
    vec![
        SelectionOption::new("Active", "Active"),
        SelectionOption::new("Inactive", "Inactive"),
    ]
}

impl ProtocolsPage {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        let controller = ProtocolsController::new(entities.clone());
        let locale = entities.i18n.read(cx).locale;

        // User grid
        let grid = cx.new(|cx| {
            let mut grid = DataGrid::<AssociatedUser>::new(cx);
            grid.set_columns(Self::create_columns(locale));
            grid.seed_sort("email", SortDirection::Asc);
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

        // Protocol list search
        let search_input = text_input(
            "protocol-search",
            "",
            t(locale, "search-placeholder"),
            cx,
        );
        {
            let controller = controller.clone();
            search_input.update(cx, |input, _cx| {
                input.on_change(move |value, cx| {
                    controller.search_protocols(value, cx);
                });
            });
        }

        // Text filters
        let email_input = Self::filter_input("filter-email", UserFilterField::Email, &controller, cx);
        let first_name_input =
            Self::filter_input("filter-first-name", UserFilterField::FirstName, &controller, cx);
        let last_name_input =
            Self::filter_input("filter-last-name", UserFilterField::LastName, &controller, cx);

        // Select filters
        let role_field = Self::filter_field(
            "filter-role",
            t(locale, "field-role"),
            UserFilterField::Role,
            &controller,
            cx,
        );
        role_field.update(cx, |field, cx| field.set_static_options(role_options(), cx));
        let region_field = Self::filter_field(
            "filter-region",
            t(locale, "field-region"),
            UserFilterField::Region,
            &controller,
            cx,
        );
        let country_field = Self::filter_field(
            "filter-country",
            t(locale, "field-country"),
            UserFilterField::Country,
            &controller,
            cx,
        );
        let site_field = Self::filter_field(
            "filter-site",
            t(locale, "field-site"),
            UserFilterField::Site,
            &controller,
            cx,
        );
        let status_field = Self::filter_field(
            "filter-status",
            t(locale, "field-status"),
            UserFilterField::Status,
            &controller,
            cx,
        );
        status_field.update(cx, |field, cx| field.set_static_options(status_options(), cx));

        // Copy-user modal protocol picker
        let copy_protocol_field = cx.new(|_cx| {
            let mut field = MultiSelectField::new("copy-protocol", t(locale, "field-protocol"));
            field.set_single_select();
            field.set_virtual_scroll(100);
            field
        });
        copy_protocol_field.update(cx, |field, cx| {
            let weak = cx.entity().downgrade();
            field.on_load_more(move |request, cx| {
                if let Some(field) = weak.upgrade() {
                    fetch_protocol_options(request, field, cx);
                }
            });
        });

        // Push state into the grid whenever it changes
        let grid_clone = grid.clone();
        cx.observe(&entities.protocols, move |this, protocols, cx| {
            let (rows, loading) = {
                let state = protocols.read(cx);
                (state.users.clone(), state.users_loading)
            };
            grid_clone.update(cx, |grid, cx| {
                grid.set_rows(rows);
                grid.set_loading(loading);
                cx.notify();
            });
            this.sync_filter_options(cx);
            cx.notify();
        })
        .detach();

        // Re-render on locale change
        let grid_clone = grid.clone();
        cx.observe(&entities.i18n, move |_this, i18n, cx| {
            let locale = i18n.read(cx).locale;
            grid_clone.update(cx, |grid, cx| {
                grid.set_columns(ProtocolsPage::create_columns(locale));
                cx.notify();
            });
            cx.notify();
        })
        .detach();

        // Toasts
        cx.observe(&entities.alerts, |_this, _, cx| cx.notify()).detach();

        // Initial protocol page
        controller.load_protocols(cx);

        Self {
            entities,
            controller,
            grid,
            search_input,
            email_input,
            first_name_input,
            last_name_input,
            role_field,
            region_field,
            country_field,
            site_field,
            status_field,
            copy_protocol_field,
            options_signature: (0, 0, 0),
            show_add_menu: false,
            show_more_menu: false,
            show_copy_modal: false,
            show_send_confirm: false,
            show_resend_confirm: false,
        }
    }

    fn filter_input(
        id: &'static str,
        field: UserFilterField,
        controller: &ProtocolsController,
        cx: &mut Context<Self>,
    ) -> Entity<TextInput> {
        let input = text_input(id, "", "", cx);
        let controller = controller.clone();
        input.update(cx, |input, _cx| {
            input.on_change(move |value, cx| {
                controller.set_filter(field, Some(value.to_string()), cx);
            });
        });
        input
    }

    fn filter_field(
        id: &'static str,
        label: SharedString,
        field: UserFilterField,
        controller: &ProtocolsController,
        cx: &mut Context<Self>,
    ) -> Entity<MultiSelectField> {
        let entity = cx.new(|_cx| {
            let mut select = MultiSelectField::new(SharedString::from(id.to_string()), label);
            select.set_single_select();
            select
        });
        let controller = controller.clone();
        entity.update(cx, |select, _cx| {
            select.on_single(move |option, cx| {
                controller.set_filter(field, Some(option.id.clone()), cx);
            });
        });
        entity
    }

    /// Refresh the region/country/site option lists when they change
    fn sync_filter_options(&mut self, cx: &mut Context<Self>) {
        let (regions, countries, sites) = {
            let state = self.entities.protocols.read(cx);
            (
                state.regions.clone(),
                state.countries.clone(),
                state.sites.clone(),
            )
        };
        let signature = (regions.len(), countries.len(), sites.len());
        if signature == self.options_signature {
            return;
        }
        self.options_signature = signature;

        let to_options = |values: Vec<String>| {
            values
                .into_iter()
                .map(|v| SelectionOption::new(v.clone(), v))
                .collect::<Vec<_>>()
        };
        self.region_field.update(cx, |field, cx| {
            field.set_static_options(to_options(regions), cx);
        });
        self.country_field.update(cx, |field, cx| {
            field.set_static_options(to_options(countries), cx);
        });
        self.site_field.update(cx, |field, cx| {
            field.set_static_options(to_options(sites), cx);
        });
    }

    fn create_columns(locale: Locale) -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::checkbox(),
            ColumnSpec::new("email", t(locale, "col-email"))
                .sortable()
                .fixed_width(220.0),
            ColumnSpec::new("firstName", t(locale, "col-first-name"))
                .sortable()
                .fixed_width(120.0),
            ColumnSpec::new("lastName", t(locale, "col-last-name"))
                .sortable()
                .fixed_width(120.0),
            ColumnSpec::new("role", t(locale, "col-role"))
                .sortable()
                .fixed_width(160.0),
            ColumnSpec::new("region", t(locale, "col-region"))
                .sortable()
                .fixed_width(100.0),
            ColumnSpec::new("country", t(locale, "col-country"))
                .sortable()
                .fixed_width(110.0),
            ColumnSpec::new("site", t(locale, "col-site"))
                .sortable()
                .fixed_width(100.0),
            ColumnSpec::new("status", t(locale, "col-status"))
                .sortable()
                .fixed_width(110.0),
            ColumnSpec::action(t(locale, "col-action")),
        ]
    }

    fn add_menu_items(locale: Locale) -> Vec<DropdownActionItem> {
        vec![
            DropdownActionItem::new("manual", t(locale, "menu-add-manual")).disabled(true),
            DropdownActionItem::new("copy", t(locale, "menu-add-copy")),
        ]
    }

    fn more_menu_items(locale: Locale) -> Vec<DropdownActionItem> {
        vec![DropdownActionItem::new(
            "email",
            t(locale, "menu-registration-email"),
        )
        .with_children(vec![
            DropdownActionItem::new("send", t(locale, "menu-send-email")),
            DropdownActionItem::new("resend", t(locale, "menu-resend-email")),
        ])]
    }

    fn render_protocol_list(&mut self, locale: Locale, cx: &mut Context<Self>) -> gpui::AnyElement {
        let state = self.entities.protocols.read(cx);
        let protocols = state.protocols.items().to_vec();
        let selected_id = state
            .selected
            .as_ref()
            .map(|p| p.protocol_id.clone())
            .unwrap_or_default();
        let loading = state.protocols.is_loading();
        let has_error = state.protocols.has_error();
        let fully_loaded = state.protocols.is_fully_loaded();

        let mut list = div()
            .id("protocol-list")
            .flex_1()
            .overflow_y_scroll()
            .flex()
            .flex_col();

        for (index, protocol) in protocols.iter().enumerate() {
            let is_selected = protocol.protocol_id == selected_id;
            let item = protocol.clone();
            list = list.child(
                div()
                    .id(("protocol-item", index))
                    .px_3()
                    .py_2()
                    .flex()
                    .flex_col()
                    .cursor_pointer()
                    .bg(if is_selected {
                        CtrColors::table_row_selected()
                    } else {
                        CtrColors::content_bg()
                    })
                    .hover(|s| s.bg(CtrColors::table_row_hover()))
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.controller.select_protocol(item.clone(), cx);
                    }))
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::MEDIUM)
                            .text_color(CtrColors::text_primary())
                            .child(protocol.study_code.clone()),
                    )
                    .child(
                        div()
                            .text_size(px(12.0))
                            .text_color(CtrColors::text_secondary())
                            .child(format!(
                                "{} · {}",
                                protocol.sponsor,
                                protocol.status.label()
                            )),
                    ),
            );
        }

        if loading {
            list = list.child(
                div()
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::text_muted())
                    .child(t(locale, "table-loading")),
            );
        } else if has_error {
            list = list.child(
                div()
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::danger())
                    .child("Failed to load protocols"),
            );
        } else if !fully_loaded {
            list = list.child(
                div()
                    .id("protocol-load-more")
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::accent())
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.load_protocols(cx);
                    }))
                    .child("Load more"),
            );
        }

        div()
            .w(px(260.0))
            .h_full()
            .flex()
            .flex_col()
            .border_r_1()
            .border_color(CtrColors::border())
            .bg(CtrColors::content_bg())
            .child(
                div()
                    .px_3()
                    .py_2()
                    .border_b_1()
                    .border_color(CtrColors::border())
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(CtrColors::text_primary())
                            .child(t(locale, "label-protocols")),
                    )
                    .child(self.search_input.clone()),
            )
            .child(list)
            .into_any_element()
    }

    fn render_toolbar(&mut self, locale: Locale, cx: &mut Context<Self>) -> gpui::AnyElement {
        let state = self.entities.protocols.read(cx);
        let title = state
            .selected
            .as_ref()
            .map(|p| p.study_code.clone())
            .unwrap_or_default();
        let user_count = state.total_users;

        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .child(title),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(format!("{} {}", user_count, t(locale, "users-title"))),
                    ),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    // Add User dropdown anchor
                    .child(
                        div()
                            .relative()
                            .child(
                                Button::primary("add-user-btn", t(locale, "action-add-user"))
                                    .on_click(cx.listener(
                                        |this, _event: &ClickEvent, _window, cx| {
                                            this.show_add_menu = !this.show_add_menu;
                                            this.show_more_menu = false;
                                            cx.notify();
                                        },
                                    )),
                            )
                            .when(self.show_add_menu, |el| {
                                el.child(
                                    DropdownAction::new(
                                        "add-user-menu",
                                        Self::add_menu_items(locale),
                                    )
                                    .on_select(cx.listener(
                                        |this, value: &SharedString, _window, cx| {
                                            this.show_add_menu = false;
                                            if value.as_ref() == "copy" {
                                                this.show_copy_modal = true;
                                            }
                                            cx.notify();
                                        },
                                    )),
                                )
                            }),
                    )
                    // More Actions dropdown anchor
                    .child(
                        div()
                            .relative()
                            .child(
                                Button::secondary("more-actions-btn", t(locale, "action-more"))
                                    .on_click(cx.listener(
                                        |this, _event: &ClickEvent, _window, cx| {
                                            this.show_more_menu = !this.show_more_menu;
                                            this.show_add_menu = false;
                                            cx.notify();
                                        },
                                    )),
                            )
                            .when(self.show_more_menu, |el| {
                                el.child(
                                    DropdownAction::new(
                                        "more-actions-menu",
                                        Self::more_menu_items(locale),
                                    )
                                    .on_select(cx.listener(
                                        |this, value: &SharedString, _window, cx| {
                                            this.show_more_menu = false;
                                            match value.as_ref() {
                                                "send" => this.show_send_confirm = true,
                                                "resend" => this.show_resend_confirm = true,
                                                _ => {}
                                            }
                                            cx.notify();
                                        },
                                    )),
                                )
                            }),
                    ),
            )
            .into_any_element()
    }

    fn render_filters(&mut self, locale: Locale, cx: &mut Context<Self>) -> gpui::AnyElement {
        div()
            .w_full()
            .flex()
            .flex_wrap()
            .items_end()
            .gap_2()
            .child(self.email_input.clone())
            .child(self.first_name_input.clone())
            .child(self.last_name_input.clone())
            .child(self.role_field.clone())
            .child(self.region_field.clone())
            .child(self.country_field.clone())
            .child(self.site_field.clone())
            .child(self.status_field.clone())
            .child(
                Button::primary("apply-filters", t(locale, "action-apply"))
                    .size(crate::components::primitives::button::ButtonSize::Small)
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.apply_filters(cx);
                    })),
            )
            .child(
                Button::ghost("clear-filters", t(locale, "action-clear"))
                    .size(crate::components::primitives::button::ButtonSize::Small)
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.clear_filters(cx);
                    })),
            )
            .into_any_element()
    }

    fn render_modals(&mut self, locale: Locale, cx: &mut Context<Self>) -> Vec<gpui::AnyElement> {
        let mut modals = Vec::new();

        if self.show_send_confirm || self.show_resend_confirm {
            let resend = self.show_resend_confirm;
            let title_key = if resend {
                "modal-resend-email-title"
            } else {
                "modal-send-email-title"
            };
            modals.push(
                Modal::new(t(locale, title_key))
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(t(locale, "modal-send-email-body")),
                    )
                    .labels(t(locale, "action-confirm"), t(locale, "action-cancel"))
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_send_confirm = false;
                        this.show_resend_confirm = false;
                        cx.notify();
                    }))
                    .on_confirm(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.controller.send_registration_email(resend, cx);
                        this.show_send_confirm = false;
                        this.show_resend_confirm = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        if self.show_copy_modal {
            modals.push(
                Modal::new(t(locale, "modal-copy-user-title"))
                    .child(self.copy_protocol_field.clone())
                    .labels(t(locale, "action-confirm"), t(locale, "action-cancel"))
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_copy_modal = false;
                        cx.notify();
                    }))
                    .on_confirm(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        let source = this
                            .copy_protocol_field
                            .read(cx)
                            .selection()
                            .confirmed()
                            .first()
                            .map(|o| o.text.clone());
                        if let Some(hub) =
                            cx.try_global::<crate::services::hub::ServiceHub>()
                        {
                            if let Some(source) = source {
                                hub.log(crate::eventing::app_event::AppEvent::info(format!(
                                    "Copying users from {source}"
                                )));
                            }
                        }
                        this.show_copy_modal = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        modals
    }
}

impl Render for ProtocolsPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let (page, total_users) = {
            let state = self.entities.protocols.read(cx);
            (state.page, state.total_users)
        };
        let toast = self.entities.alerts.read(cx).toast().cloned();
        let modals = self.render_modals(locale, cx);

        div()
            .relative()
            .size_full()
            .flex()
            .flex_row()
            .overflow_hidden()
            .child(self.render_protocol_list(locale, cx))
            .child(
                div()
                    .flex_1()
                    .flex()
                    .flex_col()
                    .p_4()
                    .gap_3()
                    .overflow_hidden()
                    .when_some(toast, |el, toast| {
                        let alerts = self.entities.alerts.clone();
                        el.child(
                            Alert::new(toast.kind, toast.title.clone(), toast.subtitle.clone())
                                .on_close(move |_event, _window, cx| {
                                    alerts.update(cx, |alerts, cx| {
                                        alerts.dismiss_toast();
                                        cx.notify();
                                    });
                                }),
                        )
                    })
                    .child(self.render_toolbar(locale, cx))
                    .child(self.render_filters(locale, cx))
                    .child(
                        div()
                            .flex_1()
                            .overflow_hidden()
                            .child(self.grid.clone()),
                    )
                    .child({
                        let controller = self.controller.clone();
                        Pagination::new(page, USER_PAGE_SIZE, total_users)
                            .items_label(t(locale, "users-title"))
                            .on_page_change(move |page, cx| {
                                controller.set_page(page, cx);
                            })
                    }),
            )
            .children(modals)
    }
}
