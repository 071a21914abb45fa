pub mod config;
pub mod error;
pub mod api;
pub mod models;
pub mod prompt;
pub mod views;
pub mod utils;
pub mod templates;
pub mod handlers;
pub mod routes;

pub use api::{ApiClient, CloudBackend};
pub use error::{ApiError, CreateError};
pub use models::{AppState, Provider};
pub use prompt::{FormPrompt, TerminalPrompt, UserPrompt};
pub use routes::build_router;
pub use views::{InstanceListView, NodeCreator};
