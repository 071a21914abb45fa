use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_GCP_ZONE: &str = "europe-west1-b";
pub const DEFAULT_GCP_IMAGE_PROJECT: &str = "ubuntu-os-cloud";
pub const DEFAULT_GCP_IMAGE_FAMILY: &str = "ubuntu-2204-lts";
pub const DEFAULT_AWS_REGION: &str = "us-west-2";
// Ubuntu 22.04 in us-west-2
pub const DEFAULT_AWS_IMAGE_ID: &str = "ami-03c1f788292172a4e";
// Console sessions live as long as their cookie, and at most this many are kept
pub const CONSOLE_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;
pub const MAX_CONSOLE_SESSIONS: usize = 1024;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

/// Initial values of the creation form's placement and image fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorDefaults {
    pub gcp_zone: String,
    pub gcp_image_project: String,
    pub gcp_image_family: String,
    pub aws_region: String,
    pub aws_image_id: String,
}

impl Default for CreatorDefaults {
    fn default() -> Self {
        Self {
            gcp_zone: DEFAULT_GCP_ZONE.to_string(),
            gcp_image_project: DEFAULT_GCP_IMAGE_PROJECT.to_string(),
            gcp_image_family: DEFAULT_GCP_IMAGE_FAMILY.to_string(),
            aws_region: DEFAULT_AWS_REGION.to_string(),
            aws_image_id: DEFAULT_AWS_IMAGE_ID.to_string(),
        }
    }
}

pub fn get_creator_defaults() -> CreatorDefaults {
    CreatorDefaults {
        gcp_zone: env_or("DEFAULT_GCP_ZONE", DEFAULT_GCP_ZONE),
        gcp_image_project: env_or("DEFAULT_GCP_IMAGE_PROJECT", DEFAULT_GCP_IMAGE_PROJECT),
        gcp_image_family: env_or("DEFAULT_GCP_IMAGE_FAMILY", DEFAULT_GCP_IMAGE_FAMILY),
        aws_region: env_or("DEFAULT_AWS_REGION", DEFAULT_AWS_REGION),
        aws_image_id: env_or("DEFAULT_AWS_IMAGE_ID", DEFAULT_AWS_IMAGE_ID),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}
