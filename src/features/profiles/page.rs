//! Profiles Page
//!
//! Protocol picker, lazily-paged profile list, test/cohort/visit filter
//! fields, and the inline-editable blind/hide DataGrid with bulk
//! removal actions.

use gpui::{
    div, prelude::*, px, ClickEvent, Context, Entity, IntoElement, ParentElement, Render,
    SharedString, Styled, Window,
};

use crate::app::entities::AppEntities;
use crate::components::composite::alert::Alert;
use crate::components::composite::data_grid::{
    ColumnSpec, DataGrid, EditKeyMap, Pagination, SortDirection,
};
use crate::components::composite::modal::Modal;
use crate::components::composite::multi_select::MultiSelectField;
use crate::components::primitives::button::{Button, ButtonSize};
use crate::components::primitives::text_input::{text_input, TextInput};
use crate::domain::profile::BlindOrHide;
use crate::features::fetch_protocol_options;
use crate::features::profiles::controller::{DetailFilterField, ProfilesController};
use crate::i18n::{t, Locale};
use crate::services::hub::{ServiceCommand, ServiceHub};
use crate::state::profiles_state::{blind_or_hide_options, ProfileRow, DETAIL_PAGE_SIZE};
use crate::theme::colors::CtrColors;

/// Profiles page component
pub struct ProfilesPage {
    entities: AppEntities,
    controller: ProfilesController,
    grid: Entity<DataGrid<ProfileRow>>,
    protocol_field: Entity<MultiSelectField>,
    tests_field: Entity<MultiSelectField>,
    cohorts_field: Entity<MultiSelectField>,
    visits_field: Entity<MultiSelectField>,
    blind_field: Entity<MultiSelectField>,
    profile_search_input: Entity<TextInput>,
    detail_search_input: Entity<TextInput>,
    profile_name_input: Entity<TextInput>,
    /// Option-set signature last pushed into the filter fields
    options_signature: (usize, usize, usize),
    show_add_profile_modal: bool,
    show_protocol_required_modal: bool,
    show_remove_profile_modal: bool,
    show_remove_blind_hide_modal: bool,
}

impl ProfilesPage {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        let controller = ProfilesController::new(entities.clone());
        let locale = entities.i18n.read(cx).locale;

        // Detail grid
        let grid = cx.new(|cx| {
            let mut grid = DataGrid::<ProfileRow>::new(cx);
            grid.set_columns(Self::create_columns(locale));
            grid.set_keyed(true);
            grid.set_enable_edit(true);
            grid.set_edit_key_map(Self::edit_key_map());
            grid.seed_sort("testsDisplay", SortDirection::Asc);
            grid.set_empty_message(t(locale, "table-no-data"));
            grid
        });
        {
            let controller = controller.clone();
            let grid_weak = grid.downgrade();
            let page = cx.entity().downgrade();
            grid.update(cx, |grid, _cx| {
                {
                    let controller = controller.clone();
                    grid.on_sort(move |event, cx| {
                        controller.sort_changed(event, cx);
                    });
                }
                grid.on_checkbox(move |_change, cx| {
                    // The remove-blind/hide button tracks the grid selection.
                    if let Some(page) = page.upgrade() {
                        page.update(cx, |_this, cx| cx.notify());
                    }
                });
                {
                    let controller = controller.clone();
                    grid.on_row_saved(move |_index, row, cx| {
                        controller.row_saved(row, cx);
                    });
                }
                grid.on_edit_changed(move |column_key, values, cx| {
                    if column_key == "testsDisplay" {
                        controller.edit_tests_changed(values, cx);
                    }
                    // Clearing the cohort empties the visit buffer too.
                    if column_key == "cohortName" && values.is_empty() {
                        let grid_weak = grid_weak.clone();
                        cx.defer(move |cx| {
                            if let Some(grid) = grid_weak.upgrade() {
                                grid.update(cx, |grid, cx| {
                                    grid.set_edit_values("visitsDisplay", Vec::new(), cx);
                                });
                            }
                        });
                    }
                });
            });
        }

        // Protocol picker (catalog-backed, single-select)
        let protocol_field = cx.new(|_cx| {
            let mut field = MultiSelectField::new("profiles-protocol", t(locale, "field-protocol"));
            field.set_single_select();
            field.set_virtual_scroll(40);
            field.set_placeholder(t(locale, "field-protocol"));
            field
        });
        protocol_field.update(cx, |field, cx| {
            let weak = cx.entity().downgrade();
            field.on_load_more(move |request, cx| {
                if let Some(field) = weak.upgrade() {
                    fetch_protocol_options(request, field, cx);
                }
            });
            let controller = controller.clone();
            field.on_single(move |option, cx| {
                controller.protocol_selected(option.id.clone(), option.text.clone(), cx);
            });
        });

        // Filter fields
        let tests_field = Self::multi_filter_field(
            "filter-tests",
            t(locale, "field-tests"),
            t(locale, "all-tests"),
            DetailFilterField::Tests,
            &controller,
            cx,
        );
        let cohorts_field = Self::multi_filter_field(
            "filter-cohorts",
            t(locale, "field-cohorts"),
            t(locale, "all-cohorts"),
            DetailFilterField::Cohorts,
            &controller,
            cx,
        );
        let visits_field = Self::multi_filter_field(
            "filter-visits",
            t(locale, "field-visits"),
            t(locale, "all-visits"),
            DetailFilterField::Visits,
            &controller,
            cx,
        );

        let blind_field = cx.new(|_cx| {
            let mut field =
                MultiSelectField::new("filter-blind-hide", t(locale, "field-blind-hide"));
            field.set_single_select();
            field
        });
        blind_field.update(cx, |field, cx| {
            field.set_static_options(blind_or_hide_options(), cx);
            let controller = controller.clone();
            field.on_single(move |option, cx| {
                controller.set_blind_filter(BlindOrHide::parse(&option.id), cx);
            });
        });

        // Profile list search
        let profile_search_input =
            text_input("profile-search", "", t(locale, "search-placeholder"), cx);
        {
            let controller = controller.clone();
            profile_search_input.update(cx, |input, _cx| {
                input.on_change(move |value, cx| {
                    controller.search_profiles(value, cx);
                });
            });
        }

        // Detail free-text search
        let detail_search_input =
            text_input("detail-search", "", t(locale, "search-placeholder"), cx);
        {
            let controller = controller.clone();
            detail_search_input.update(cx, |input, _cx| {
                input.on_change(move |value, cx| {
                    controller.search_detail(value, cx);
                });
            });
        }

        // Add-profile modal name input
        let profile_name_input = text_input("profile-name", "", "Profile name", cx);

        // Push state into the grid and react to stale flags
        let grid_clone = grid.clone();
        cx.observe(&entities.profiles, move |this, profiles, cx| {
            let (rows, loading, edit_options, stale, filters_stale, cohorts_stale, list_stale) = {
                let state = profiles.read(cx);
                (
                    state.rows.clone(),
                    state.detail_loading,
                    state.edit_options(),
                    state.detail_stale,
                    state.filters_stale,
                    state.cohort_tests_stale,
                    state.profiles_stale,
                )
            };
            grid_clone.update(cx, |grid, cx| {
                grid.set_edit_options(edit_options);
                grid.set_rows(rows);
                grid.set_loading(loading);
                cx.notify();
            });
            this.sync_filter_options(cx);
            if stale {
                this.controller.load_detail(cx);
            }
            if filters_stale {
                this.controller.load_filter_options(cx);
            }
            if cohorts_stale {
                this.controller.load_cohort_tests(cx);
            }
            if list_stale {
                this.controller.load_profiles(cx);
            }
            cx.notify();
        })
        .detach();

        // Locale changes rebuild the columns
        let grid_clone = grid.clone();
        cx.observe(&entities.i18n, move |_this, i18n, cx| {
            let locale = i18n.read(cx).locale;
            grid_clone.update(cx, |grid, cx| {
                grid.set_columns(ProfilesPage::create_columns(locale));
                cx.notify();
            });
            cx.notify();
        })
        .detach();

        // Alerts (toast + validation notice)
        cx.observe(&entities.alerts, |_this, _, cx| cx.notify()).detach();

        Self {
            entities,
            controller,
            grid,
            protocol_field,
            tests_field,
            cohorts_field,
            visits_field,
            blind_field,
            profile_search_input,
            detail_search_input,
            profile_name_input,
            options_signature: (0, 0, 0),
            show_add_profile_modal: false,
            show_protocol_required_modal: false,
            show_remove_profile_modal: false,
            show_remove_blind_hide_modal: false,
        }
    }

    fn multi_filter_field(
        id: &'static str,
        label: SharedString,
        all_text: SharedString,
        field: DetailFilterField,
        controller: &ProfilesController,
        cx: &mut Context<Self>,
    ) -> Entity<MultiSelectField> {
        let entity = cx.new(|_cx| {
            let mut select = MultiSelectField::new(SharedString::from(id.to_string()), label);
            select.set_all_options_text(all_text);
            select
        });
        let controller = controller.clone();
        entity.update(cx, |select, _cx| {
            select.on_change(move |change, cx| {
                controller.set_filter(field, change.ids.clone(), cx);
            });
        });
        entity
    }

    /// Refresh the filter fields' option sets when they change
    fn sync_filter_options(&mut self, cx: &mut Context<Self>) {
        let (tests, cohorts, visits) = {
            let state = self.entities.profiles.read(cx);
            (
                state.test_options.clone(),
                state.cohort_options.clone(),
                state.visit_options.clone(),
            )
        };
        let signature = (tests.len(), cohorts.len(), visits.len());
        if signature == self.options_signature {
            return;
        }
        self.options_signature = signature;

        self.tests_field
            .update(cx, |field, cx| field.set_static_options(tests, cx));
        self.cohorts_field
            .update(cx, |field, cx| field.set_static_options(cohorts, cx));
        self.visits_field
            .update(cx, |field, cx| field.set_static_options(visits, cx));
    }

    fn edit_key_map() -> EditKeyMap {
        EditKeyMap::from_iter([
            ("testsDisplay".to_string(), "testsValues".to_string()),
            ("visitsDisplay".to_string(), "visitsValues".to_string()),
            ("cohortName".to_string(), "cohortValue".to_string()),
        ])
    }

    fn create_columns(locale: Locale) -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::checkbox(),
            ColumnSpec::new("testsDisplay", t(locale, "col-tests"))
                .sortable()
                .sort_field("Tests")
                .editable(true)
                .all_options(t(locale, "all-tests"))
                .flex_width(Some(220.0), None),
            ColumnSpec::new("cohortName", t(locale, "col-cohort"))
                .sortable()
                .sort_field("CohortName")
                .editable(false)
                .all_options(t(locale, "all-cohorts"))
                .fixed_width(200.0),
            ColumnSpec::new("visitsDisplay", t(locale, "col-visits"))
                .sortable()
                .sort_field("Visits")
                .editable(true)
                .all_options(t(locale, "all-visits"))
                .flex_width(Some(220.0), None),
            ColumnSpec::new("blindOrHide", t(locale, "col-blind-hide"))
                .sortable()
                .sort_field("BlindOrHide")
                .editable(false)
                .fixed_width(140.0),
            ColumnSpec::action(t(locale, "col-action")),
        ]
    }

    fn render_profile_list(&mut self, locale: Locale, cx: &mut Context<Self>) -> gpui::AnyElement {
        let state = self.entities.profiles.read(cx);
        let profiles = state.profiles.items().to_vec();
        let selected_id = state
            .selected_profile
            .as_ref()
            .map(|p| p.profile_id.clone())
            .unwrap_or_default();
        let checked: Vec<bool> = profiles
            .iter()
            .map(|p| state.is_profile_checked(&p.profile_id))
            .collect();
        let loading = state.profiles.is_loading();
        let fully_loaded = state.profiles.is_fully_loaded();
        let has_protocol = state.selected_protocol.is_some();

        let mut list = div()
            .id("profile-list")
            .flex_1()
            .overflow_y_scroll()
            .flex()
            .flex_col();

        for (index, profile) in profiles.iter().enumerate() {
            let is_selected = profile.profile_id == selected_id;
            let is_checked = checked[index];
            let item = profile.clone();
            let check_id = profile.profile_id.clone();
            list = list.child(
                div()
                    .id(("profile-item", index))
                    .px_3()
                    .py_2()
                    .flex()
                    .items_center()
                    .gap_2()
                    .cursor_pointer()
                    .bg(if is_selected {
                        CtrColors::table_row_selected()
                    } else {
                        CtrColors::content_bg()
                    })
                    .hover(|s| s.bg(CtrColors::table_row_hover()))
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.controller.select_profile(item.clone(), cx);
                    }))
                    .child(
                        crate::components::primitives::checkbox::Checkbox::new((
                            "profile-check",
                            index,
                        ))
                        .checked(is_checked)
                        .on_change(cx.listener(
                            move |this, _checked: &bool, _window, cx| {
                                cx.stop_propagation();
                                this.controller.toggle_profile_checked(&check_id, cx);
                            },
                        )),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_primary())
                            .child(profile.profile_name.clone()),
                    )
                    .when(profile.is_default, |el| {
                        el.child(
                            div()
                                .text_size(px(10.0))
                                .text_color(CtrColors::accent())
                                .child("default"),
                        )
                    }),
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
        } else if has_protocol && !fully_loaded {
            list = list.child(
                div()
                    .id("profile-load-more")
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(CtrColors::accent())
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.load_profiles(cx);
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
                            .child(t(locale, "label-profiles")),
                    )
                    .child(self.profile_search_input.clone()),
            )
            .child(list)
            .into_any_element()
    }

    fn render_toolbar(&mut self, locale: Locale, cx: &mut Context<Self>) -> gpui::AnyElement {
        let has_checked = !self
            .entities
            .profiles
            .read(cx)
            .checked_profiles
            .is_empty();
        let any_row_checked = !self.grid.read(cx).selection().is_empty();

        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .child(div().w(px(360.0)).child(self.protocol_field.clone()))
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(
                        Button::primary("add-profile-btn", t(locale, "action-add-profile"))
                            .size(ButtonSize::Small)
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                let has_protocol = this
                                    .entities
                                    .profiles
                                    .read(cx)
                                    .selected_protocol
                                    .is_some();
                                if has_protocol {
                                    this.show_add_profile_modal = true;
                                } else {
                                    this.show_protocol_required_modal = true;
                                }
                                cx.notify();
                            })),
                    )
                    .child(
                        Button::danger("remove-profile-btn", t(locale, "action-remove-profile"))
                            .size(ButtonSize::Small)
                            .disabled(!has_checked)
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.show_remove_profile_modal = true;
                                cx.notify();
                            })),
                    )
                    .child(
                        Button::danger(
                            "remove-blind-hide-btn",
                            t(locale, "action-remove-blind-hide"),
                        )
                        .size(ButtonSize::Small)
                        .disabled(!any_row_checked)
                        .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                            this.show_remove_blind_hide_modal = true;
                            cx.notify();
                        })),
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
            .child(div().w(px(240.0)).child(self.tests_field.clone()))
            .child(div().w(px(220.0)).child(self.cohorts_field.clone()))
            .child(div().w(px(240.0)).child(self.visits_field.clone()))
            .child(div().w(px(160.0)).child(self.blind_field.clone()))
            .child(self.detail_search_input.clone())
            .child(
                Button::primary("apply-detail-filters", t(locale, "action-apply"))
                    .size(ButtonSize::Small)
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.apply_filters(cx);
                    })),
            )
            .child(
                Button::ghost("clear-detail-filters", t(locale, "action-clear"))
                    .size(ButtonSize::Small)
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.clear_filters(cx);
                    })),
            )
            .into_any_element()
    }

    fn render_modals(&mut self, locale: Locale, cx: &mut Context<Self>) -> Vec<gpui::AnyElement> {
        let mut modals = Vec::new();

        if self.show_protocol_required_modal {
            modals.push(
                Modal::new(t(locale, "modal-protocol-required-title"))
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(t(locale, "modal-protocol-required-body")),
                    )
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_protocol_required_modal = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        if self.show_add_profile_modal {
            modals.push(
                Modal::new(t(locale, "action-add-profile"))
                    .child(self.profile_name_input.clone())
                    .labels(t(locale, "action-save"), t(locale, "action-cancel"))
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_add_profile_modal = false;
                        cx.notify();
                    }))
                    .on_confirm(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        let name = this.profile_name_input.read(cx).value().trim().to_string();
                        if name.is_empty() {
                            return;
                        }
                        let protocol = this.entities.profiles.read(cx).selected_protocol.clone();
                        if let Some((protocol_id, study_code)) = protocol {
                            if let Some(hub) = cx.try_global::<ServiceHub>() {
                                hub.send(ServiceCommand::AddProfile {
                                    request: crate::services::api::AddProfileRequest {
                                        profile_name: name,
                                        protocol_id,
                                    },
                                    study_code,
                                });
                            }
                        }
                        this.show_add_profile_modal = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        if self.show_remove_profile_modal {
            modals.push(
                Modal::new(t(locale, "modal-remove-profile-title"))
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(t(locale, "modal-remove-profile-body")),
                    )
                    .labels(t(locale, "action-confirm"), t(locale, "action-cancel"))
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_remove_profile_modal = false;
                        cx.notify();
                    }))
                    .on_confirm(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.remove_checked_profiles(cx);
                        this.show_remove_profile_modal = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        if self.show_remove_blind_hide_modal {
            modals.push(
                Modal::new(t(locale, "modal-remove-blind-hide-title"))
                    .child(
                        div()
                            .text_sm()
                            .text_color(CtrColors::text_secondary())
                            .child(t(locale, "modal-remove-blind-hide-body")),
                    )
                    .labels(t(locale, "action-confirm"), t(locale, "action-cancel"))
                    .on_close(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.show_remove_blind_hide_modal = false;
                        cx.notify();
                    }))
                    .on_confirm(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        let selection = this.grid.read(cx).selection().clone();
                        this.controller.remove_blind_hide(&selection, cx);
                        this.grid.update(cx, |grid, cx| {
                            grid.clear_selection();
                            cx.notify();
                        });
                        this.show_remove_blind_hide_modal = false;
                        cx.notify();
                    }))
                    .into_any_element(),
            );
        }

        modals
    }
}

impl Render for ProfilesPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.i18n.read(cx).locale;
        let (page, total_rows) = {
            let state = self.entities.profiles.read(cx);
            (state.page, state.total_rows)
        };
        let alerts = self.entities.alerts.read(cx);
        let toast = alerts.toast().cloned();
        let validation = alerts.validation().cloned();
        let modals = self.render_modals(locale, cx);

        div()
            .relative()
            .size_full()
            .flex()
            .flex_row()
            .overflow_hidden()
            .child(self.render_profile_list(locale, cx))
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
                    .when_some(validation, |el, notice| {
                        el.child(
                            div()
                                .px_3()
                                .py_2()
                                .rounded_md()
                                .bg(CtrColors::alert_validation_bg())
                                .border_1()
                                .border_color(CtrColors::warning())
                                .text_sm()
                                .text_color(CtrColors::warning())
                                .child(notice.message.clone()),
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
                        Pagination::new(page, DETAIL_PAGE_SIZE, total_rows)
                            .items_label(t(locale, "col-blind-hide"))
                            .on_page_change(move |page, cx| {
                                controller.set_page(page, cx);
                            })
                    }),
            )
            .children(modals)
    }
}
