use serde_json::Value;

use crate::error::ApiError;
use crate::models::{AwsCreateRequest, AwsInstance, AwsInstanceType, CatalogEnvelope, ListResponse};

use super::backend::{decode, ensure_success};
use super::client::ApiClient;

pub async fn list_instances(client: &ApiClient) -> Result<ListResponse<AwsInstance>, ApiError> {
    let payload = client.call("GET", "/api/aws/list", None, None).await?;
    decode(payload)
}

pub async fn delete_instance(client: &ApiClient, id: &str, region: Option<&str>) -> Result<Value, ApiError> {
    let endpoint = format!("/api/aws/instances/{}", urlencoding::encode(id));
    let params = region
        .filter(|r| !r.is_empty())
        .map(|r| vec![("region".to_string(), r.to_string())]);
    let payload = client.call("DELETE", &endpoint, None, params).await?;
    ensure_success(payload)
}

/// Instance types in `region` with at least `min_vcpus` vCPUs and `min_memory_gb` GB of memory.
pub async fn load_instance_types(
    client: &ApiClient,
    region: &str,
    min_vcpus: u32,
    min_memory_gb: u32,
) -> Result<Vec<AwsInstanceType>, ApiError> {
    let params = vec![
        ("region".to_string(), region.to_string()),
        ("min_vcpus".to_string(), min_vcpus.to_string()),
        ("min_memory_gb".to_string(), min_memory_gb.to_string()),
    ];
    let payload = client.call("GET", "/api/aws/instance-types", None, Some(params)).await?;
    decode::<CatalogEnvelope<AwsInstanceType>>(payload).map(CatalogEnvelope::into_vec)
}

pub async fn create_instances(client: &ApiClient, request: &AwsCreateRequest) -> Result<Value, ApiError> {
    let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.call("POST", "/api/aws/create", Some(body), None).await
}
