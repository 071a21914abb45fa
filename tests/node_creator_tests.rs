mod common;

use common::{aws_type, gcp_type, FakeBackend};
use nodedeck::config::CreatorDefaults;
use nodedeck::error::{ApiError, CreateError, GENERIC_ERROR_MESSAGE};
use nodedeck::models::{CreateRequest, Provider};
use nodedeck::views::NodeCreator;
use serde_json::json;

fn creator() -> NodeCreator {
    NodeCreator::new(&CreatorDefaults::default())
}

#[test]
fn test_initial_state() {
    let c = creator();
    assert_eq!(c.provider(), Provider::Gcp);
    assert_eq!(c.count, 1);
    assert_eq!(c.name(), "gcp-node");
    assert_eq!(c.gcp.zone, "europe-west1-b");
    assert_eq!(c.aws.region, "us-west-2");
    assert_eq!((c.gcp.min_cpus, c.gcp.min_ram_gb), (2, 4));
}

#[tokio::test]
async fn test_aws_catalog_selects_first_type() {
    let backend = FakeBackend::new();
    backend.set_aws_types(Ok(vec![aws_type("t3.medium", 2, 4.0), aws_type("t3.large", 2, 8.0)]));
    let mut c = creator();
    c.set_provider(Provider::Aws);

    c.refresh_catalog(&backend).await;

    assert_eq!(backend.calls(), vec!["aws_types:us-west-2:2:4".to_string()]);
    assert_eq!(c.aws.instance_types.len(), 2);
    assert_eq!(c.selected_type(), "t3.medium");
}

#[tokio::test]
async fn test_existing_selection_is_kept() {
    let backend = FakeBackend::new();
    backend.set_gcp_types(Ok(vec![gcp_type("e2-medium", 2, 4.0), gcp_type("e2-standard-4", 4, 16.0)]));
    let mut c = creator();
    c.set_selected_type("e2-standard-4");

    c.refresh_catalog(&backend).await;

    assert_eq!(c.selected_type(), "e2-standard-4");
}

#[tokio::test]
async fn test_catalog_failure_keeps_previous_types() {
    let backend = FakeBackend::new();
    backend.set_gcp_types(Ok(vec![gcp_type("e2-medium", 2, 4.0)]));
    let mut c = creator();
    c.refresh_catalog(&backend).await;

    backend.set_gcp_types(Err(ApiError::Transport("timeout".into())));
    c.gcp.min_cpus = 8;
    c.refresh_catalog(&backend).await;

    assert_eq!(c.gcp.machine_types.len(), 1);
    assert!(c.error().is_none());
}

#[test]
fn test_stale_catalog_response_is_discarded() {
    let mut c = creator();
    let first = c.begin_catalog_fetch();
    c.gcp.zone = "us-central1-a".into();
    let second = c.begin_catalog_fetch();

    assert!(c.apply_gcp_catalog(second.ticket, Ok(vec![gcp_type("n2-standard-2", 2, 8.0)])));
    assert!(!c.apply_gcp_catalog(first.ticket, Ok(vec![gcp_type("e2-medium", 2, 4.0)])));

    assert_eq!(c.gcp.machine_types.len(), 1);
    assert_eq!(c.gcp.machine_types[0].name, "n2-standard-2");
    assert_eq!(c.selected_type(), "n2-standard-2");
}

#[test]
fn test_switching_provider_keeps_each_group() {
    let mut c = creator();
    c.set_name("edge");
    c.gcp.zone = "asia-east1-a".into();
    c.set_provider(Provider::Aws);
    c.set_name("worker");

    assert_eq!(c.name(), "worker");
    c.set_provider(Provider::Gcp);
    assert_eq!(c.name(), "edge");
    assert_eq!(c.gcp.zone, "asia-east1-a");
    assert_eq!(c.aws.name, "worker");
    assert_eq!(c.aws.region, "us-west-2");
}

#[tokio::test]
async fn test_submit_uses_active_provider_only() {
    let backend = FakeBackend::new();
    backend.set_create_result(Ok(json!({"success": true, "instances": ["edge-1"]})));
    let mut c = creator();
    c.set_name("edge");
    c.set_selected_type("e2-medium");
    c.aws.selected_type = "t3.medium".into();
    c.count = 2;

    c.submit(&backend).await.unwrap();

    assert_eq!(backend.calls(), vec!["create_gcp".to_string()]);
    let created = backend.created();
    assert_eq!(created.len(), 1);
    match &created[0] {
        CreateRequest::Gcp(r) => {
            assert_eq!(r.name, "edge");
            assert_eq!(r.machine_type, "e2-medium");
            assert_eq!(r.count, 2);
            assert_eq!(r.zone, "europe-west1-b");
            assert_eq!(r.image_family, "ubuntu-2204-lts");
            assert!(r.password.is_none());
        }
        other => panic!("unexpected request {:?}", other),
    }
    assert_eq!(c.result(), Some(&json!({"success": true, "instances": ["edge-1"]})));
    assert!(c.error().is_none());
    assert!(!c.is_loading());
}

#[test]
fn test_aws_request_counts_match() {
    let mut c = creator();
    c.set_provider(Provider::Aws);
    c.set_selected_type("t3.medium");
    c.count = 3;
    c.password = "hunter2".into();

    match c.build_request().unwrap() {
        CreateRequest::Aws(r) => {
            assert_eq!(r.min_count, 3);
            assert_eq!(r.max_count, 3);
            assert_eq!(r.image_id, "ami-03c1f788292172a4e");
            assert_eq!(r.password.as_deref(), Some("hunter2"));
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_without_message_shows_generic_error() {
    let backend = FakeBackend::new();
    backend.set_create_result(Err(ApiError::Status { status: 500, message: None }));
    let mut c = creator();
    c.set_selected_type("e2-medium");

    c.submit(&backend).await.unwrap();

    assert_eq!(c.error(), Some(GENERIC_ERROR_MESSAGE));
    assert!(c.result().is_none());
    assert!(!c.is_loading());
}

#[tokio::test]
async fn test_rejection_message_is_shown() {
    let backend = FakeBackend::new();
    backend.set_create_result(Err(ApiError::Status {
        status: 400,
        message: Some("Quota exceeded".into()),
    }));
    let mut c = creator();
    c.set_selected_type("e2-medium");

    c.submit(&backend).await.unwrap();

    assert_eq!(c.error(), Some("Quota exceeded"));
}

#[test]
fn test_zero_count_is_refused() {
    let mut c = creator();
    c.set_selected_type("e2-medium");
    c.count = 0;

    assert_eq!(c.begin_submit().unwrap_err(), CreateError::InvalidCount);
    assert_eq!(c.error(), Some("Count must be at least 1"));
    assert!(!c.is_loading());
}

#[test]
fn test_missing_type_is_refused() {
    let mut c = creator();
    assert_eq!(c.build_request().unwrap_err(), CreateError::MissingType);
}

#[test]
fn test_second_submission_while_in_flight_is_refused() {
    let mut c = creator();
    c.set_selected_type("e2-medium");
    let (ticket, _) = c.begin_submit().unwrap();
    assert!(c.is_loading());

    assert_eq!(c.begin_submit().unwrap_err(), CreateError::InFlight);
    assert!(c.finish_submit(ticket, Ok(json!({"success": true}))));
    assert!(!c.is_loading());
}

#[test]
fn test_submit_label() {
    let mut c = creator();
    assert_eq!(c.submit_label(), "Create 1 Instance");
    c.count = 3;
    assert_eq!(c.submit_label(), "Create 3 Instances");
    c.set_selected_type("e2-medium");
    c.begin_submit().unwrap();
    assert_eq!(c.submit_label(), "Creating 3 Instances...");
}

#[tokio::test]
async fn test_switching_back_refetches_catalog() {
    let backend = FakeBackend::new();
    let mut c = creator();
    c.refresh_catalog(&backend).await;
    c.set_provider(Provider::Aws);
    c.refresh_catalog(&backend).await;
    c.set_provider(Provider::Gcp);
    c.refresh_catalog(&backend).await;

    assert_eq!(backend.count_calls("gcp_types"), 2);
    assert_eq!(backend.count_calls("aws_types"), 1);
}

#[test]
fn test_remount_restores_defaults() {
    let mut c = creator();
    c.set_provider(Provider::Aws);
    c.set_name("worker");
    c.count = 4;
    c.password = "hunter2".into();
    c.aws.instance_types = vec![aws_type("t3.medium", 2, 4.0)];

    c.remount(&CreatorDefaults::default());

    assert_eq!(c.provider(), Provider::Gcp);
    assert_eq!(c.aws.name, "aws-node");
    assert_eq!(c.count, 1);
    assert!(c.password.is_empty());
    assert!(c.aws.instance_types.is_empty());
}

#[test]
fn test_outcomes_from_before_remount_are_discarded() {
    let mut c = creator();
    c.set_selected_type("e2-medium");
    let (submission, _) = c.begin_submit().unwrap();
    let catalog = c.begin_catalog_fetch();

    c.remount(&CreatorDefaults::default());

    assert!(!c.is_loading());
    assert!(!c.finish_submit(submission, Ok(json!({"success": true}))));
    assert!(c.result().is_none());
    assert!(!c.apply_gcp_catalog(catalog.ticket, Ok(vec![gcp_type("e2-medium", 2, 4.0)])));
    assert!(c.gcp.machine_types.is_empty());
}
