use serde_json::Value;

use crate::api::CloudBackend;
use crate::config::CreatorDefaults;
use crate::error::{ApiError, CreateError};
use crate::models::{
    AwsCreateRequest, AwsInstanceType, CreateRequest, GcpCreateRequest, GcpMachineType, Provider,
};

use super::sequence::{RequestSequence, Ticket};

/// Filter inputs a catalog query depends on: location, min CPU, min RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub location: String,
    pub min_cpus: u32,
    pub min_ram_gb: u32,
}

/// One catalog query to run against the backend.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub provider: Provider,
    pub ticket: Ticket,
    pub filter: CatalogFilter,
}

#[derive(Debug, Clone)]
pub struct GcpFields {
    pub name: String,
    pub zone: String,
    pub min_cpus: u32,
    pub min_ram_gb: u32,
    pub machine_types: Vec<GcpMachineType>,
    pub selected_type: String,
    pub image_project: String,
    pub image_family: String,
    requests: RequestSequence,
}

impl GcpFields {
    fn new(defaults: &CreatorDefaults) -> Self {
        Self {
            name: "gcp-node".into(),
            zone: defaults.gcp_zone.clone(),
            min_cpus: 2,
            min_ram_gb: 4,
            machine_types: Vec::new(),
            selected_type: String::new(),
            image_project: defaults.gcp_image_project.clone(),
            image_family: defaults.gcp_image_family.clone(),
            requests: RequestSequence::default(),
        }
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            location: self.zone.clone(),
            min_cpus: self.min_cpus,
            min_ram_gb: self.min_ram_gb,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AwsFields {
    pub name: String,
    pub region: String,
    pub min_vcpus: u32,
    pub min_memory_gb: u32,
    pub instance_types: Vec<AwsInstanceType>,
    pub selected_type: String,
    pub image_id: String,
    requests: RequestSequence,
}

impl AwsFields {
    fn new(defaults: &CreatorDefaults) -> Self {
        Self {
            name: "aws-node".into(),
            region: defaults.aws_region.clone(),
            min_vcpus: 2,
            min_memory_gb: 4,
            instance_types: Vec::new(),
            selected_type: String::new(),
            image_id: defaults.aws_image_id.clone(),
            requests: RequestSequence::default(),
        }
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            location: self.region.clone(),
            min_cpus: self.min_vcpus,
            min_ram_gb: self.min_memory_gb,
        }
    }
}

/// State behind the creation form.
///
/// Each provider keeps its own field group; switching provider never touches
/// either group, and a submission reads only the active one.
#[derive(Debug, Clone)]
pub struct NodeCreator {
    provider: Provider,
    pub count: u32,
    pub password: String,
    pub gcp: GcpFields,
    pub aws: AwsFields,
    result: Option<Value>,
    error: Option<String>,
    loading: bool,
    submissions: RequestSequence,
}

impl Default for NodeCreator {
    fn default() -> Self {
        Self::new(&CreatorDefaults::default())
    }
}

impl NodeCreator {
    pub fn new(defaults: &CreatorDefaults) -> Self {
        Self {
            provider: Provider::Gcp,
            count: 1,
            password: String::new(),
            gcp: GcpFields::new(defaults),
            aws: AwsFields::new(defaults),
            result: None,
            error: None,
            loading: false,
            submissions: RequestSequence::default(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn set_provider(&mut self, provider: Provider) {
        self.provider = provider;
    }

    /// Name prefix of the active provider.
    pub fn name(&self) -> &str {
        match self.provider {
            Provider::Gcp => &self.gcp.name,
            Provider::Aws => &self.aws.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        match self.provider {
            Provider::Gcp => self.gcp.name = name.into(),
            Provider::Aws => self.aws.name = name.into(),
        }
    }

    pub fn selected_type(&self) -> &str {
        match self.provider {
            Provider::Gcp => &self.gcp.selected_type,
            Provider::Aws => &self.aws.selected_type,
        }
    }

    pub fn set_selected_type(&mut self, selected: impl Into<String>) {
        match self.provider {
            Provider::Gcp => self.gcp.selected_type = selected.into(),
            Provider::Aws => self.aws.selected_type = selected.into(),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> String {
        let noun = if self.count > 1 { "Instances" } else { "Instance" };
        if self.loading {
            format!("Creating {} {}...", self.count, noun)
        } else {
            format!("Create {} {}", self.count, noun)
        }
    }

    /// The active provider's current filter.
    pub fn active_filter(&self) -> CatalogFilter {
        match self.provider {
            Provider::Gcp => self.gcp.filter(),
            Provider::Aws => self.aws.filter(),
        }
    }

    /// Reset every field to `defaults` for a fresh display of the form.
    ///
    /// Request sequences survive the reset and are invalidated, so a catalog
    /// or submission still in flight never lands on the new form.
    pub fn remount(&mut self, defaults: &CreatorDefaults) {
        let mut submissions = std::mem::take(&mut self.submissions);
        let mut gcp_requests = std::mem::take(&mut self.gcp.requests);
        let mut aws_requests = std::mem::take(&mut self.aws.requests);
        submissions.invalidate();
        gcp_requests.invalidate();
        aws_requests.invalidate();

        *self = Self::new(defaults);
        self.submissions = submissions;
        self.gcp.requests = gcp_requests;
        self.aws.requests = aws_requests;
    }

    pub fn begin_catalog_fetch(&mut self) -> CatalogQuery {
        let filter = self.active_filter();
        let ticket = match self.provider {
            Provider::Gcp => self.gcp.requests.issue(),
            Provider::Aws => self.aws.requests.issue(),
        };
        CatalogQuery {
            provider: self.provider,
            ticket,
            filter,
        }
    }

    /// Apply a GCP catalog result. Returns whether the catalog was replaced.
    pub fn apply_gcp_catalog(&mut self, ticket: Ticket, result: Result<Vec<GcpMachineType>, ApiError>) -> bool {
        if !self.gcp.requests.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "Discarding stale GCP machine types");
            return false;
        }
        match result {
            Ok(types) => {
                if self.gcp.selected_type.is_empty() {
                    if let Some(first) = types.first() {
                        self.gcp.selected_type = first.name.clone();
                    }
                }
                self.gcp.machine_types = types;
                true
            }
            Err(e) => {
                tracing::warn!(%e, zone = %self.gcp.zone, "Failed to load GCP machine types");
                false
            }
        }
    }

    /// Apply an AWS catalog result. Returns whether the catalog was replaced.
    pub fn apply_aws_catalog(&mut self, ticket: Ticket, result: Result<Vec<AwsInstanceType>, ApiError>) -> bool {
        if !self.aws.requests.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "Discarding stale AWS instance types");
            return false;
        }
        match result {
            Ok(types) => {
                if self.aws.selected_type.is_empty() {
                    if let Some(first) = types.first() {
                        self.aws.selected_type = first.instance_type.clone();
                    }
                }
                self.aws.instance_types = types;
                true
            }
            Err(e) => {
                tracing::warn!(%e, region = %self.aws.region, "Failed to load AWS instance types");
                false
            }
        }
    }

    /// Query the active provider's catalog and apply the result.
    pub async fn refresh_catalog<B>(&mut self, backend: &B)
    where
        B: CloudBackend + ?Sized,
    {
        let query = self.begin_catalog_fetch();
        let filter = &query.filter;
        match query.provider {
            Provider::Gcp => {
                let result = backend
                    .gcp_machine_types(&filter.location, filter.min_cpus, filter.min_ram_gb)
                    .await;
                self.apply_gcp_catalog(query.ticket, result);
            }
            Provider::Aws => {
                let result = backend
                    .aws_instance_types(&filter.location, filter.min_cpus, filter.min_ram_gb)
                    .await;
                self.apply_aws_catalog(query.ticket, result);
            }
        }
    }

    /// Build the creation payload from the active provider's fields.
    pub fn build_request(&self) -> Result<CreateRequest, CreateError> {
        if self.count < 1 {
            return Err(CreateError::InvalidCount);
        }
        let password = Some(self.password.clone()).filter(|p| !p.is_empty());
        let request = match self.provider {
            Provider::Gcp => CreateRequest::Gcp(GcpCreateRequest {
                zone: self.gcp.zone.clone(),
                name: self.gcp.name.clone(),
                machine_type: self.gcp.selected_type.clone(),
                count: self.count,
                image_project: self.gcp.image_project.clone(),
                image_family: self.gcp.image_family.clone(),
                password,
            }),
            Provider::Aws => CreateRequest::Aws(AwsCreateRequest {
                region: self.aws.region.clone(),
                name: self.aws.name.clone(),
                instance_type: self.aws.selected_type.clone(),
                min_count: self.count,
                max_count: self.count,
                image_id: self.aws.image_id.clone(),
                password,
            }),
        };
        if self.selected_type().trim().is_empty() {
            return Err(CreateError::MissingType);
        }
        Ok(request)
    }

    /// Start a submission: clears the previous outcome and marks the view busy.
    ///
    /// A client-side rejection is stored as the displayed error and returned.
    pub fn begin_submit(&mut self) -> Result<(Ticket, CreateRequest), CreateError> {
        if self.loading {
            return Err(CreateError::InFlight);
        }
        self.result = None;
        self.error = None;
        match self.build_request() {
            Ok(request) => {
                self.loading = true;
                Ok((self.submissions.issue(), request))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Store the outcome of a submission. Returns whether it was applied.
    pub fn finish_submit(&mut self, ticket: Ticket, outcome: Result<Value, ApiError>) -> bool {
        if !self.submissions.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(value) => {
                tracing::info!(provider = %self.provider, "Creation request accepted");
                self.result = Some(value);
                self.error = None;
            }
            Err(e) => {
                tracing::error!(%e, provider = %self.provider, "Creation request failed");
                self.result = None;
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Submit exactly one creation request built from the active provider.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<(), CreateError>
    where
        B: CloudBackend + ?Sized,
    {
        let (ticket, request) = self.begin_submit()?;
        let outcome = send_create(backend, &request).await;
        self.finish_submit(ticket, outcome);
        Ok(())
    }
}

/// Issue the provider-specific creation call for `request`.
pub async fn send_create<B>(backend: &B, request: &CreateRequest) -> Result<Value, ApiError>
where
    B: CloudBackend + ?Sized,
{
    match request {
        CreateRequest::Gcp(r) => backend.create_gcp_instances(r).await,
        CreateRequest::Aws(r) => backend.create_aws_instances(r).await,
    }
}
