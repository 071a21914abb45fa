use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{AppState, ConsoleSession, Provider};
use crate::templates::{CreatePageTemplate, TypeOption};
use crate::utils::{parse_flag, parse_form_u32, value_to_pretty_string};
use crate::views::node_creator::send_create;
use crate::views::NodeCreator;

use super::helpers::{build_template_globals, redirect_with_flash, render_template, TemplateGlobals};
use super::middleware::ConsoleId;

#[derive(Deserialize, Debug)]
pub struct ProviderForm {
    pub provider: String,
}

/// Fields of the creation form. Placement and filter inputs apply to the
/// active provider's field group only.
#[derive(Deserialize, Debug, Default)]
pub struct CreateForm {
    pub name: Option<String>,
    pub count: Option<String>,
    pub password: Option<String>,
    pub clear_password: Option<String>,
    pub location: Option<String>,
    pub min_cpus: Option<String>,
    pub min_ram: Option<String>,
    pub selected_type: Option<String>,
    pub image_project: Option<String>,
    pub image_family: Option<String>,
    pub image_id: Option<String>,
    pub intent: Option<String>,
}

impl CreateForm {
    /// Copy the submitted values into the creator. Numeric inputs that do not
    /// parse leave the previous value in place, and so does a blank password
    /// unless `clear_password` is set.
    pub fn apply_to(&self, creator: &mut NodeCreator) {
        if let Some(name) = &self.name {
            creator.set_name(name.trim());
        }
        if let Some(count) = parse_form_u32(self.count.as_deref()) {
            creator.count = count;
        }
        if parse_flag(self.clear_password.as_deref(), false) {
            creator.password.clear();
        }
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            creator.password = password.to_string();
        }
        let location = self.location.as_deref().map(str::trim).filter(|l| !l.is_empty());
        let min_cpus = parse_form_u32(self.min_cpus.as_deref());
        let min_ram = parse_form_u32(self.min_ram.as_deref());
        match creator.provider() {
            Provider::Gcp => {
                let gcp = &mut creator.gcp;
                if let Some(zone) = location {
                    gcp.zone = zone.to_string();
                }
                gcp.min_cpus = min_cpus.unwrap_or(gcp.min_cpus);
                gcp.min_ram_gb = min_ram.unwrap_or(gcp.min_ram_gb);
                if let Some(project) = &self.image_project {
                    gcp.image_project = project.trim().to_string();
                }
                if let Some(family) = &self.image_family {
                    gcp.image_family = family.trim().to_string();
                }
            }
            Provider::Aws => {
                let aws = &mut creator.aws;
                if let Some(region) = location {
                    aws.region = region.to_string();
                }
                aws.min_vcpus = min_cpus.unwrap_or(aws.min_vcpus);
                aws.min_memory_gb = min_ram.unwrap_or(aws.min_memory_gb);
                if let Some(image_id) = &self.image_id {
                    aws.image_id = image_id.trim().to_string();
                }
            }
        }
        if let Some(selected) = self.selected_type.as_deref().filter(|s| !s.is_empty()) {
            creator.set_selected_type(selected);
        }
    }

    pub fn intent(&self) -> &str {
        self.intent.as_deref().unwrap_or("filters")
    }
}

/// Mark the creation page as displayed; arriving from another page starts
/// the form over from the configured defaults.
fn mount_creator(state: &AppState, session: &mut ConsoleSession) {
    if session.visit("create") {
        session.creator.remount(&state.creator_defaults);
    }
}

/// Query the active provider's catalog for the current filter. The session
/// lock is released while the backend is awaited.
pub async fn load_catalog(state: &AppState, console_id: &str) {
    let query = state.with_console(console_id, |s| {
        mount_creator(state, s);
        s.creator.begin_catalog_fetch()
    });
    let filter = &query.filter;
    match query.provider {
        Provider::Gcp => {
            let result = state
                .backend
                .gcp_machine_types(&filter.location, filter.min_cpus, filter.min_ram_gb)
                .await;
            state.with_console(console_id, |s| s.creator.apply_gcp_catalog(query.ticket, result));
        }
        Provider::Aws => {
            let result = state
                .backend
                .aws_instance_types(&filter.location, filter.min_cpus, filter.min_ram_gb)
                .await;
            state.with_console(console_id, |s| s.creator.apply_aws_catalog(query.ticket, result));
        }
    }
}

fn type_options(creator: &NodeCreator) -> Vec<TypeOption> {
    let selected = creator.selected_type();
    match creator.provider() {
        Provider::Gcp => creator
            .gcp
            .machine_types
            .iter()
            .map(|t| TypeOption {
                value: t.name.clone(),
                label: format!("{} ({} vCPU, {} GB RAM)", t.name, t.cpus, t.ram_gb),
                selected: t.name == selected,
            })
            .collect(),
        Provider::Aws => creator
            .aws
            .instance_types
            .iter()
            .map(|t| TypeOption {
                value: t.instance_type.clone(),
                label: format!("{} ({} vCPU, {} GB RAM)", t.instance_type, t.vcpus, t.memory_gb),
                selected: t.instance_type == selected,
            })
            .collect(),
    }
}

fn build_page(creator: &NodeCreator, globals: TemplateGlobals) -> CreatePageTemplate {
    let TemplateGlobals { backend_hostname, active_page, flash_messages, has_flash_messages } = globals;
    let is_gcp = creator.provider() == Provider::Gcp;
    let (location_label, min_cpus_label, min_ram_label, type_label) = if is_gcp {
        ("Zone", "Min CPUs", "Min RAM (GB)", "Machine Type")
    } else {
        ("Region", "Min vCPUs", "Min Memory (GB)", "Instance Type")
    };
    let filter = creator.active_filter();
    CreatePageTemplate {
        backend_hostname,
        active_page,
        flash_messages,
        has_flash_messages,
        provider: creator.provider().as_str().to_string(),
        is_gcp,
        name: creator.name().to_string(),
        count: creator.count,
        password_set: !creator.password.is_empty(),
        location_label: location_label.into(),
        location: filter.location,
        min_cpus_label: min_cpus_label.into(),
        min_cpus: filter.min_cpus,
        min_ram_label: min_ram_label.into(),
        min_ram: filter.min_ram_gb,
        type_label: type_label.into(),
        type_options: type_options(creator),
        gcp_image_project: creator.gcp.image_project.clone(),
        gcp_image_family: creator.gcp.image_family.clone(),
        aws_image_id: creator.aws.image_id.clone(),
        submit_label: creator.submit_label(),
        submitting: creator.is_loading(),
        error: creator.error().unwrap_or_default().to_string(),
        result_json: creator.result().map(value_to_pretty_string).unwrap_or_default(),
    }
}

pub async fn create_get(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
) -> Response {
    load_catalog(&state, &console_id).await;
    let globals = build_template_globals(&state, &console_id, "create");
    let page = state.with_console(&console_id, |s| build_page(&s.creator, globals));
    render_template(page)
}

pub async fn provider_post(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
    Form(form): Form<ProviderForm>,
) -> Response {
    match Provider::try_from(form.provider.as_str()) {
        Ok(provider) => {
            state.with_console(&console_id, |s| {
                mount_creator(&state, s);
                s.creator.set_provider(provider);
            });
            Redirect::to("/create").into_response()
        }
        Err(e) => redirect_with_flash(&state, &console_id, "/create", e),
    }
}

/// Apply the form. `intent=create` also submits; `intent=filters` only
/// stores the new filter, which the redirected page queries.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(ConsoleId(console_id)): Extension<ConsoleId>,
    Form(form): Form<CreateForm>,
) -> Response {
    let submission = state.with_console(&console_id, |s| {
        mount_creator(&state, s);
        form.apply_to(&mut s.creator);
        (form.intent() == "create").then(|| s.creator.begin_submit())
    });

    match submission {
        Some(Ok((ticket, request))) => {
            tracing::info!(provider = %request.provider(), "Submitting creation request");
            // The outcome is applied from a detached task so that a dropped
            // connection cannot leave the form in flight.
            let task_state = state.clone();
            let task_console = console_id.clone();
            let task = tokio::spawn(async move {
                let outcome = send_create(task_state.backend.as_ref(), &request).await;
                task_state.with_console(&task_console, |s| s.creator.finish_submit(ticket, outcome));
            });
            if let Err(e) = task.await {
                tracing::error!(%e, "Creation task failed");
                let outcome = Err(ApiError::Transport(e.to_string()));
                state.with_console(&console_id, |s| s.creator.finish_submit(ticket, outcome));
            }
        }
        Some(Err(e)) => tracing::warn!(%e, "Creation request refused"),
        None => {}
    }
    Redirect::to("/create").into_response()
}
