use serde::{Deserialize, Serialize};

/// An EC2 instance as listed by the backend. Field names follow the EC2 API.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AwsInstance {
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_ip_address: Option<String>,
    #[serde(default)]
    pub state: Option<AwsInstanceState>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AwsInstanceState {
    #[serde(default)]
    pub name: String,
}

impl AwsInstance {
    /// `Name` tag when present and non-empty, otherwise the instance id.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.instance_id,
        }
    }

    pub fn state_name(&self) -> &str {
        self.state.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    pub fn is_running(&self) -> bool {
        self.state_name() == "running"
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AwsInstanceType {
    pub instance_type: String,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub memory_gb: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AwsCreateRequest {
    pub region: String,
    pub name: String,
    pub instance_type: String,
    pub min_count: u32,
    pub max_count: u32,
    pub image_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
