use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    AwsCreateRequest, AwsInstance, AwsInstanceType, GcpCreateRequest, GcpInstance, GcpMachineType,
    ListResponse,
};

use super::client::ApiClient;

/// Request/response contract of the provisioning backend.
///
/// Both views are written against this trait; [`ApiClient`] is the HTTP
/// implementation.
#[async_trait]
pub trait CloudBackend: Send + Sync {
    async fn list_gcp_instances(&self) -> Result<ListResponse<GcpInstance>, ApiError>;
    async fn list_aws_instances(&self) -> Result<ListResponse<AwsInstance>, ApiError>;

    async fn delete_gcp_instance(&self, name: &str, zone: Option<&str>) -> Result<Value, ApiError>;
    async fn delete_aws_instance(&self, id: &str, region: Option<&str>) -> Result<Value, ApiError>;

    async fn gcp_machine_types(
        &self,
        zone: &str,
        min_cpus: u32,
        min_ram_gb: u32,
    ) -> Result<Vec<GcpMachineType>, ApiError>;
    async fn aws_instance_types(
        &self,
        region: &str,
        min_vcpus: u32,
        min_memory_gb: u32,
    ) -> Result<Vec<AwsInstanceType>, ApiError>;

    async fn create_gcp_instances(&self, request: &GcpCreateRequest) -> Result<Value, ApiError>;
    async fn create_aws_instances(&self, request: &AwsCreateRequest) -> Result<Value, ApiError>;
}

#[async_trait]
impl CloudBackend for ApiClient {
    async fn list_gcp_instances(&self) -> Result<ListResponse<GcpInstance>, ApiError> {
        super::gcp::list_instances(self).await
    }

    async fn list_aws_instances(&self) -> Result<ListResponse<AwsInstance>, ApiError> {
        super::aws::list_instances(self).await
    }

    async fn delete_gcp_instance(&self, name: &str, zone: Option<&str>) -> Result<Value, ApiError> {
        super::gcp::delete_instance(self, name, zone).await
    }

    async fn delete_aws_instance(&self, id: &str, region: Option<&str>) -> Result<Value, ApiError> {
        super::aws::delete_instance(self, id, region).await
    }

    async fn gcp_machine_types(
        &self,
        zone: &str,
        min_cpus: u32,
        min_ram_gb: u32,
    ) -> Result<Vec<GcpMachineType>, ApiError> {
        super::gcp::load_machine_types(self, zone, min_cpus, min_ram_gb).await
    }

    async fn aws_instance_types(
        &self,
        region: &str,
        min_vcpus: u32,
        min_memory_gb: u32,
    ) -> Result<Vec<AwsInstanceType>, ApiError> {
        super::aws::load_instance_types(self, region, min_vcpus, min_memory_gb).await
    }

    async fn create_gcp_instances(&self, request: &GcpCreateRequest) -> Result<Value, ApiError> {
        super::gcp::create_instances(self, request).await
    }

    async fn create_aws_instances(&self, request: &AwsCreateRequest) -> Result<Value, ApiError> {
        super::aws::create_instances(self, request).await
    }
}

/// Decode a JSON body into `T`, mapping failures to [`ApiError::Decode`].
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Treat a `{"success": false}` envelope as a failed call.
pub(crate) fn ensure_success(value: Value) -> Result<Value, ApiError> {
    if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
        let message = super::client::error_message_from_body(&value);
        return Err(ApiError::Rejected { message });
    }
    Ok(value)
}
