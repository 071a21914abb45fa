use serde_json::Value;

use crate::error::ApiError;
use crate::models::{CatalogEnvelope, GcpCreateRequest, GcpInstance, GcpMachineType, ListResponse};

use super::backend::{decode, ensure_success};
use super::client::ApiClient;

pub async fn list_instances(client: &ApiClient) -> Result<ListResponse<GcpInstance>, ApiError> {
    let payload = client.call("GET", "/api/gcp/list", None, None).await?;
    decode(payload)
}

pub async fn delete_instance(client: &ApiClient, name: &str, zone: Option<&str>) -> Result<Value, ApiError> {
    let endpoint = format!("/api/gcp/instances/{}", urlencoding::encode(name));
    let params = zone
        .filter(|z| !z.is_empty())
        .map(|z| vec![("zone".to_string(), z.to_string())]);
    let payload = client.call("DELETE", &endpoint, None, params).await?;
    ensure_success(payload)
}

/// Machine types in `zone` with at least `min_cpus` CPUs and `min_ram_gb` GB of RAM.
pub async fn load_machine_types(
    client: &ApiClient,
    zone: &str,
    min_cpus: u32,
    min_ram_gb: u32,
) -> Result<Vec<GcpMachineType>, ApiError> {
    let params = vec![
        ("zone".to_string(), zone.to_string()),
        ("min_cpus".to_string(), min_cpus.to_string()),
        ("min_ram_gb".to_string(), min_ram_gb.to_string()),
    ];
    let payload = client.call("GET", "/api/gcp/instance-types", None, Some(params)).await?;
    decode::<CatalogEnvelope<GcpMachineType>>(payload).map(CatalogEnvelope::into_vec)
}

pub async fn create_instances(client: &ApiClient, request: &GcpCreateRequest) -> Result<Value, ApiError> {
    let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.call("POST", "/api/gcp/create", Some(body), None).await
}
