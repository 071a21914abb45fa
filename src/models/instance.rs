use super::{AwsInstance, GcpInstance, Provider};

/// One listed instance, tagged by the provider that owns it.
#[derive(Clone, Debug, PartialEq)]
pub enum Instance {
    Gcp(GcpInstance),
    Aws(AwsInstance),
}

/// What a delete request needs to address an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Gcp { name: String, zone: Option<String> },
    Aws { id: String, region: Option<String> },
}

impl DeleteTarget {
    pub fn provider(&self) -> Provider {
        match self {
            DeleteTarget::Gcp { .. } => Provider::Gcp,
            DeleteTarget::Aws { .. } => Provider::Aws,
        }
    }

    /// Identifying fields as `(key, value)` pairs, for query strings and hidden inputs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        match self {
            DeleteTarget::Gcp { name, zone } => {
                pairs.push(("name".to_string(), name.clone()));
                if let Some(z) = zone {
                    pairs.push(("zone".to_string(), z.clone()));
                }
            }
            DeleteTarget::Aws { id, region } => {
                pairs.push(("id".to_string(), id.clone()));
                if let Some(r) = region {
                    pairs.push(("region".to_string(), r.clone()));
                }
            }
        }
        pairs
    }

    /// Text of the confirmation question for this target.
    pub fn confirmation_message(&self) -> String {
        match self {
            DeleteTarget::Gcp { name, .. } => format!("Delete GCP instance {}?", name),
            DeleteTarget::Aws { id, .. } => format!("Delete AWS instance {}?", id),
        }
    }
}

impl Instance {
    pub fn title(&self) -> &str {
        match self {
            Instance::Gcp(i) => &i.name,
            Instance::Aws(i) => i.display_name(),
        }
    }

    /// Second line of a row: zone and machine type for GCP, the id for AWS.
    pub fn subtitle(&self) -> String {
        match self {
            Instance::Gcp(i) => format!("{} | {}", i.zone, i.machine_type),
            Instance::Aws(i) => i.instance_id.clone(),
        }
    }

    pub fn ip_display(&self) -> String {
        let ips = match self {
            Instance::Gcp(i) => i.external_ips.join(", "),
            Instance::Aws(i) => i.public_ip_address.clone().unwrap_or_default(),
        };
        if ips.is_empty() {
            "None".into()
        } else {
            ips
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Instance::Gcp(i) => &i.status,
            Instance::Aws(i) => i.state_name(),
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Instance::Gcp(i) => i.is_running(),
            Instance::Aws(i) => i.is_running(),
        }
    }

    /// AWS rows without an instance id cannot be deleted.
    pub fn delete_target(&self) -> Option<DeleteTarget> {
        match self {
            Instance::Gcp(i) => Some(DeleteTarget::Gcp {
                name: i.name.clone(),
                zone: Some(i.zone.clone()).filter(|z| !z.is_empty()),
            }),
            Instance::Aws(i) if !i.instance_id.is_empty() => Some(DeleteTarget::Aws {
                id: i.instance_id.clone(),
                region: None,
            }),
            Instance::Aws(_) => None,
        }
    }
}
