use serde::Serialize;

use super::{AwsCreateRequest, GcpCreateRequest, Provider};

/// A creation payload built from exactly one provider's field group.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CreateRequest {
    Gcp(GcpCreateRequest),
    Aws(AwsCreateRequest),
}

impl CreateRequest {
    pub fn provider(&self) -> Provider {
        match self {
            CreateRequest::Gcp(_) => Provider::Gcp,
            CreateRequest::Aws(_) => Provider::Aws,
        }
    }
}
