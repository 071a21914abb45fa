// View state for the two console pages
pub mod sequence;
pub mod instance_list;
pub mod node_creator;

pub use sequence::{RequestSequence, Ticket};
pub use instance_list::{DeleteOutcome, InstanceListView, LoadTickets, DELETE_FAILED_MESSAGE};
pub use node_creator::{AwsFields, CatalogFilter, CatalogQuery, GcpFields, NodeCreator};
