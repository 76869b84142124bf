//! Feature Layer
//!
//! One module per admin page, each split into a controller (intent and
//! service calls) and a page (GPUI view).

pub mod capabilities;
pub mod profiles;
pub mod protocols;

use gpui::{App, Entity};

use crate::components::composite::multi_select::catalog::CatalogRequest;
use crate::components::composite::multi_select::MultiSelectField;
use crate::domain::selection::SelectionOption;
use crate::services::api::PageQuery;
use crate::services::hub::ServiceHub;
use crate::services::runtime;

/// Fetch one catalog page of activated protocols straight into a
/// multi-select field. Dropdown catalogs bypass the command/event pump:
/// the field owns the version counter, so the one-shot result is applied
/// (or discarded) right at the field.
pub fn fetch_protocol_options(
    request: CatalogRequest,
    field: Entity<MultiSelectField>,
    cx: &mut App,
) {
    let api = cx.try_global::<ServiceHub>().and_then(ServiceHub::api);
    let query = PageQuery {
        page: request.page,
        page_size: request.page_size,
        search_fields: Some(vec!["studyCode".to_string()]),
        search_value: (!request.search.is_empty()).then(|| request.search.clone()),
    };
    let version = request.version;

    // The update is applied from the spawned task: this function is
    // reached from inside the field's own handlers, so the entity must
    // not be re-entered synchronously.
    cx.spawn(async move |cx| {
        let result = match api {
            Some(api) => {
                runtime::run_in_tokio(async move { api.activated_protocols(&query).await }).await
            }
            None => Err(crate::error::Error::Invalid {
                message: "No API client configured".to_string(),
            }),
        };
        let _ = cx.update(|cx| {
            field.update(cx, |field, cx| match result {
                Ok(page) => {
                    let options: Vec<SelectionOption> = page
                        .items
                        .iter()
                        .map(|p| SelectionOption::new(p.protocol_id.clone(), p.study_code.clone()))
                        .collect();
                    field.apply_page(version, options, page.total_count, cx);
                }
                Err(e) => {
                    tracing::warn!("protocol options load failed: {e}");
                    field.apply_error(version, cx);
                }
            })
        });
    })
    .detach();
}
