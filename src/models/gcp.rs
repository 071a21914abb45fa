use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GcpInstance {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub machine_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub external_ips: Vec<String>,
}

impl GcpInstance {
    pub fn is_running(&self) -> bool {
        self.status == "RUNNING"
    }
}

/// A machine type entry of the GCP catalog.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GcpMachineType {
    pub name: String,
    #[serde(default)]
    pub cpus: u32,
    #[serde(default)]
    pub ram_gb: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GcpCreateRequest {
    pub zone: String,
    pub name: String,
    pub machine_type: String,
    pub count: u32,
    pub image_project: String,
    pub image_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
