use nodedeck::config;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Tests below mutate process-wide environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://backend.internal:5000/"),
        "http://backend.internal:5000"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://backend.internal:5000///"),
        "http://backend.internal:5000"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  https://nodes.example.com/backend/  "),
        "https://nodes.example.com/backend"
    );
}

#[test]
fn test_sanitize_base_url_empty_string() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:5000");
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:5000");
}

#[test]
fn test_get_api_base_url_with_trailing_slash() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("API_BASE_URL", "http://backend.internal:5000/");

    let result = config::get_api_base_url();

    assert_eq!(result, "http://backend.internal:5000");
    env::remove_var("API_BASE_URL");
}

#[test]
fn test_get_api_base_url_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::remove_var("API_BASE_URL");

    // DEFAULT_API_BASE_URL is empty, so the localhost fallback applies
    assert_eq!(config::get_api_base_url(), "http://localhost:5000");
}

#[test]
fn test_creator_defaults_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    env::set_var("DEFAULT_GCP_ZONE", "us-central1-a");
    env::set_var("DEFAULT_AWS_REGION", "  ");

    let defaults = config::get_creator_defaults();

    assert_eq!(defaults.gcp_zone, "us-central1-a");
    // blank values fall back to the built-in default
    assert_eq!(defaults.aws_region, config::DEFAULT_AWS_REGION);
    assert_eq!(defaults.gcp_image_family, config::DEFAULT_GCP_IMAGE_FAMILY);

    env::remove_var("DEFAULT_GCP_ZONE");
    env::remove_var("DEFAULT_AWS_REGION");
}

#[test]
fn test_creator_defaults_builtin() {
    let defaults = config::CreatorDefaults::default();
    assert_eq!(defaults.gcp_zone, "europe-west1-b");
    assert_eq!(defaults.gcp_image_project, "ubuntu-os-cloud");
    assert_eq!(defaults.aws_region, "us-west-2");
    assert_eq!(defaults.aws_image_id, "ami-03c1f788292172a4e");
}
