use chrono::{DateTime, Local};
use futures_util::future::join;

use crate::api::CloudBackend;
use crate::error::ApiError;
use crate::models::{AwsInstance, DeleteTarget, GcpInstance, Instance, ListResponse, Provider};
use crate::prompt::UserPrompt;

use super::sequence::{RequestSequence, Ticket};

pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete instance";

/// Tickets for one load cycle, one per provider plus the cycle itself.
#[derive(Debug, Clone, Copy)]
pub struct LoadTickets {
    pub cycle: Ticket,
    pub gcp: Ticket,
    pub aws: Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; nothing was sent.
    Declined,
    /// The backend accepted the delete and both lists were reloaded.
    Deleted,
    /// The backend call failed; the operator was notified.
    Failed,
}

/// State behind the instance listing page.
#[derive(Debug, Default)]
pub struct InstanceListView {
    gcp_instances: Vec<GcpInstance>,
    aws_instances: Vec<AwsInstance>,
    loading: bool,
    refresh_key: u64,
    last_loaded_at: Option<DateTime<Local>>,
    cycles: RequestSequence,
    gcp_requests: RequestSequence,
    aws_requests: RequestSequence,
}

impl InstanceListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gcp_instances(&self) -> &[GcpInstance] {
        &self.gcp_instances
    }

    pub fn aws_instances(&self) -> &[AwsInstance] {
        &self.aws_instances
    }

    /// One provider's list as provider-tagged rows.
    pub fn instances(&self, provider: Provider) -> Vec<Instance> {
        match provider {
            Provider::Gcp => self.gcp_instances.iter().cloned().map(Instance::Gcp).collect(),
            Provider::Aws => self.aws_instances.iter().cloned().map(Instance::Aws).collect(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Local>> {
        self.last_loaded_at
    }

    /// Forget everything shown by a previous display. The load that follows
    /// issues fresh tickets, so responses still in flight are discarded.
    pub fn remount(&mut self) {
        self.gcp_instances.clear();
        self.aws_instances.clear();
        self.last_loaded_at = None;
        self.loading = false;
    }

    /// Ask for a new load cycle.
    pub fn refresh(&mut self) -> u64 {
        self.refresh_key += 1;
        self.refresh_key
    }

    pub fn begin_load(&mut self) -> LoadTickets {
        self.loading = true;
        LoadTickets {
            cycle: self.cycles.issue(),
            gcp: self.gcp_requests.issue(),
            aws: self.aws_requests.issue(),
        }
    }

    /// Apply a GCP list result. Returns whether the list was replaced.
    pub fn apply_gcp(&mut self, ticket: Ticket, result: Result<ListResponse<GcpInstance>, ApiError>) -> bool {
        if !self.gcp_requests.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "Discarding stale GCP instance list");
            return false;
        }
        apply_list(Provider::Gcp, &mut self.gcp_instances, result)
    }

    /// Apply an AWS list result. Returns whether the list was replaced.
    pub fn apply_aws(&mut self, ticket: Ticket, result: Result<ListResponse<AwsInstance>, ApiError>) -> bool {
        if !self.aws_requests.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "Discarding stale AWS instance list");
            return false;
        }
        apply_list(Provider::Aws, &mut self.aws_instances, result)
    }

    /// Close a load cycle. Clears the loading flag whatever the outcome,
    /// unless a newer cycle is still running.
    pub fn finish_load(&mut self, cycle: Ticket) {
        if self.cycles.is_current(cycle) {
            self.loading = false;
            self.last_loaded_at = Some(Local::now());
        }
    }

    /// Fetch both providers concurrently and apply each result independently.
    pub async fn load<B>(&mut self, backend: &B)
    where
        B: CloudBackend + ?Sized,
    {
        let tickets = self.begin_load();
        let (gcp, aws) = join(backend.list_gcp_instances(), backend.list_aws_instances()).await;
        self.apply_gcp(tickets.gcp, gcp);
        self.apply_aws(tickets.aws, aws);
        self.finish_load(tickets.cycle);
    }

    pub async fn delete_gcp<B, P>(&mut self, backend: &B, prompt: &P, name: &str, zone: Option<&str>) -> DeleteOutcome
    where
        B: CloudBackend + ?Sized,
        P: UserPrompt + ?Sized,
    {
        let target = DeleteTarget::Gcp {
            name: name.to_string(),
            zone: zone.map(str::to_string),
        };
        self.delete(backend, prompt, &target).await
    }

    pub async fn delete_aws<B, P>(&mut self, backend: &B, prompt: &P, id: &str, region: Option<&str>) -> DeleteOutcome
    where
        B: CloudBackend + ?Sized,
        P: UserPrompt + ?Sized,
    {
        let target = DeleteTarget::Aws {
            id: id.to_string(),
            region: region.map(str::to_string),
        };
        self.delete(backend, prompt, &target).await
    }

    /// Confirm, delete, then reload both lists on success.
    pub async fn delete<B, P>(&mut self, backend: &B, prompt: &P, target: &DeleteTarget) -> DeleteOutcome
    where
        B: CloudBackend + ?Sized,
        P: UserPrompt + ?Sized,
    {
        if !prompt.confirm(&target.confirmation_message()) {
            return DeleteOutcome::Declined;
        }
        let result = send_delete(backend, target).await;
        let outcome = self.after_delete(prompt, target, result);
        if outcome == DeleteOutcome::Deleted {
            self.load(backend).await;
        }
        outcome
    }

    /// Record the result of a delete call. A success bumps the refresh key;
    /// the caller then reloads both lists.
    pub fn after_delete<P>(&mut self, prompt: &P, target: &DeleteTarget, result: Result<serde_json::Value, ApiError>) -> DeleteOutcome
    where
        P: UserPrompt + ?Sized,
    {
        match result {
            Ok(_) => {
                tracing::info!(provider = %target.provider(), target = ?target, "Instance deleted");
                self.refresh();
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(%e, provider = %target.provider(), target = ?target, "Failed to delete instance");
                prompt.notify(DELETE_FAILED_MESSAGE);
                DeleteOutcome::Failed
            }
        }
    }
}

/// Issue the provider-specific delete call for `target`.
pub async fn send_delete<B>(backend: &B, target: &DeleteTarget) -> Result<serde_json::Value, ApiError>
where
    B: CloudBackend + ?Sized,
{
    match target {
        DeleteTarget::Gcp { name, zone } => backend.delete_gcp_instance(name, zone.as_deref()).await,
        DeleteTarget::Aws { id, region } => backend.delete_aws_instance(id, region.as_deref()).await,
    }
}

fn apply_list<T>(provider: Provider, current: &mut Vec<T>, result: Result<ListResponse<T>, ApiError>) -> bool {
    match result {
        Ok(resp) if resp.success => {
            *current = resp.instances.unwrap_or_default();
            true
        }
        Ok(_) => {
            tracing::warn!(%provider, "Instance list reported success=false; keeping previous list");
            false
        }
        Err(e) => {
            tracing::warn!(%e, %provider, "Failed to load instances");
            false
        }
    }
}
