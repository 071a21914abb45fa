// Backend API modules
pub mod client;
pub mod backend;
pub mod gcp;
pub mod aws;

pub use client::{set_silent, ApiClient};
pub use backend::CloudBackend;
