use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use futures_util::future::join;

use crate::models::{AppState, DeleteForm, InstanceView, Provider};
use crate::prompt::{FormPrompt, UserPrompt};
use crate::templates::{ConfirmationTemplate, InstancesPageTemplate};
use crate::views::instance_list::send_delete;

use super::helpers::{build_template_globals, redirect_with_flash, render_template, TemplateGlobals};
use super::middleware::ConsoleId;

/// Load both provider lists for this console. Every display of the listing
/// fetches; arriving from another page also drops the lists shown before.
/// The session lock is released while the backend is awaited.
pub async fn load_listing(state: &AppState, console_id: &str) {
    let tickets = state.with_console(console_id, |s| {
        if s.visit("instances") {
            s.listing.remount();
        }
        s.listing.begin_load()
    });
    let backend = state.backend.clone();
    let (gcp, aws) = join(backend.list_gcp_instances(), backend.list_aws_instances()).await;
    state.with_console(console_id, |s| {
        s.listing.apply_gcp(tickets.gcp, gcp);
        s.listing.apply_aws(tickets.aws, aws);
        s.listing.finish_load(tickets.cycle);
    });
}

pub async fn instances_get(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
) -> impl IntoResponse {
    load_listing(&state, &console_id).await;
    let (gcp_rows, aws_rows, loading, last_loaded) = state.with_console(&console_id, |s| {
        let rows = |p: Provider| -> Vec<InstanceView> {
            s.listing.instances(p).iter().map(InstanceView::from_instance).collect()
        };
        let last_loaded = s
            .listing
            .last_loaded_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        (rows(Provider::Gcp), rows(Provider::Aws), s.listing.is_loading(), last_loaded)
    });
    let TemplateGlobals { backend_hostname, active_page, flash_messages, has_flash_messages } =
        build_template_globals(&state, &console_id, "instances");
    render_template(InstancesPageTemplate {
        backend_hostname,
        active_page,
        flash_messages,
        has_flash_messages,
        gcp_instances: &gcp_rows,
        aws_instances: &aws_rows,
        loading,
        last_loaded,
    })
}

pub async fn instances_refresh_post(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
) -> impl IntoResponse {
    let key = state.with_console(&console_id, |s| s.listing.refresh());
    tracing::debug!(refresh_key = key, "Instance list refresh requested");
    Redirect::to("/instances")
}

pub async fn confirm_delete_get(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
    Path(provider): Path<String>,
    Query(form): Query<DeleteForm>,
) -> Response {
    state.with_console(&console_id, |s| s.visit("instances"));
    let Ok(provider) = Provider::try_from(provider.as_str()) else {
        return redirect_with_flash(&state, &console_id, "/instances", "Unknown provider");
    };
    let Some(target) = form.target(provider) else {
        return redirect_with_flash(&state, &console_id, "/instances", "Missing instance identifier");
    };
    let TemplateGlobals { backend_hostname, active_page, flash_messages, has_flash_messages } =
        build_template_globals(&state, &console_id, "instances");
    render_template(ConfirmationTemplate {
        backend_hostname,
        active_page,
        flash_messages,
        has_flash_messages,
        title: format!("Delete {} instance", provider.label()),
        message: target.confirmation_message(),
        target_url: format!("/instances/delete/{}", provider.as_str()),
        confirm_label: "Delete".into(),
        cancel_url: "/instances".into(),
        hidden_fields: target.query_pairs(),
    })
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
    Path(provider): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let Ok(provider) = Provider::try_from(provider.as_str()) else {
        return redirect_with_flash(&state, &console_id, "/instances", "Unknown provider");
    };
    let Some(target) = form.target(provider) else {
        return redirect_with_flash(&state, &console_id, "/instances", "Missing instance identifier");
    };
    let prompt = FormPrompt::new(form.is_confirmed());
    if !prompt.confirm(&target.confirmation_message()) {
        return Redirect::to("/instances").into_response();
    }
    let result = send_delete(state.backend.as_ref(), &target).await;
    let outcome = state.with_console(&console_id, move |s| {
        let outcome = s.listing.after_delete(&prompt, &target, result);
        s.flash_messages.extend(prompt.into_notices());
        outcome
    });
    tracing::debug!(?outcome, "Delete handled");
    Redirect::to("/instances").into_response()
}
