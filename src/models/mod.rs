pub mod provider;
pub mod gcp;
pub mod aws;
pub mod instance;
pub mod instance_view;
pub mod list_response;
pub mod create_request;
pub mod confirmation;
pub mod app_state;

pub use provider::Provider;
pub use gcp::{GcpCreateRequest, GcpInstance, GcpMachineType};
pub use aws::{AwsCreateRequest, AwsInstance, AwsInstanceState, AwsInstanceType};
pub use instance::{DeleteTarget, Instance};
pub use instance_view::{confirm_delete_url, InstanceView};
pub use list_response::{CatalogEnvelope, ListResponse};
pub use create_request::CreateRequest;
pub use confirmation::DeleteForm;
pub use app_state::{AppState, ConsoleSession};
