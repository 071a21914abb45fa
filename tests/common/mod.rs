#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use nodedeck::error::ApiError;
use nodedeck::models::{
    AwsCreateRequest, AwsInstance, AwsInstanceState, AwsInstanceType, CreateRequest, GcpCreateRequest,
    GcpInstance, GcpMachineType, ListResponse,
};
use nodedeck::prompt::UserPrompt;
use nodedeck::CloudBackend;

/// In-memory backend with canned responses and a call log.
pub struct FakeBackend {
    pub gcp_list: Mutex<Result<ListResponse<GcpInstance>, ApiError>>,
    pub aws_list: Mutex<Result<ListResponse<AwsInstance>, ApiError>>,
    pub delete_result: Mutex<Result<Value, ApiError>>,
    pub gcp_types: Mutex<Result<Vec<GcpMachineType>, ApiError>>,
    pub aws_types: Mutex<Result<Vec<AwsInstanceType>, ApiError>>,
    pub create_result: Mutex<Result<Value, ApiError>>,
    pub create_delay: Mutex<Option<Duration>>,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<CreateRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            gcp_list: Mutex::new(Ok(list(vec![]))),
            aws_list: Mutex::new(Ok(list(vec![]))),
            delete_result: Mutex::new(Ok(json!({"success": true}))),
            gcp_types: Mutex::new(Ok(vec![])),
            aws_types: Mutex::new(Ok(vec![])),
            create_result: Mutex::new(Ok(json!({"success": true}))),
            create_delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gcp_list(&self, result: Result<ListResponse<GcpInstance>, ApiError>) {
        *self.gcp_list.lock().unwrap() = result;
    }

    pub fn set_aws_list(&self, result: Result<ListResponse<AwsInstance>, ApiError>) {
        *self.aws_list.lock().unwrap() = result;
    }

    pub fn set_delete_result(&self, result: Result<Value, ApiError>) {
        *self.delete_result.lock().unwrap() = result;
    }

    pub fn set_gcp_types(&self, result: Result<Vec<GcpMachineType>, ApiError>) {
        *self.gcp_types.lock().unwrap() = result;
    }

    pub fn set_aws_types(&self, result: Result<Vec<AwsInstanceType>, ApiError>) {
        *self.aws_types.lock().unwrap() = result;
    }

    pub fn set_create_result(&self, result: Result<Value, ApiError>) {
        *self.create_result.lock().unwrap() = result;
    }

    pub fn set_create_delay(&self, delay: Option<Duration>) {
        *self.create_delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn created(&self) -> Vec<CreateRequest> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn creation_delay(&self) {
        let delay = *self.create_delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }
}

#[async_trait]
impl CloudBackend for FakeBackend {
    async fn list_gcp_instances(&self) -> Result<ListResponse<GcpInstance>, ApiError> {
        self.record("list_gcp".into());
        self.gcp_list.lock().unwrap().clone()
    }

    async fn list_aws_instances(&self) -> Result<ListResponse<AwsInstance>, ApiError> {
        self.record("list_aws".into());
        self.aws_list.lock().unwrap().clone()
    }

    async fn delete_gcp_instance(&self, name: &str, zone: Option<&str>) -> Result<Value, ApiError> {
        self.record(format!("delete_gcp:{}:{}", name, zone.unwrap_or("")));
        self.delete_result.lock().unwrap().clone()
    }

    async fn delete_aws_instance(&self, id: &str, region: Option<&str>) -> Result<Value, ApiError> {
        self.record(format!("delete_aws:{}:{}", id, region.unwrap_or("")));
        self.delete_result.lock().unwrap().clone()
    }

    async fn gcp_machine_types(&self, zone: &str, min_cpus: u32, min_ram_gb: u32) -> Result<Vec<GcpMachineType>, ApiError> {
        self.record(format!("gcp_types:{}:{}:{}", zone, min_cpus, min_ram_gb));
        self.gcp_types.lock().unwrap().clone()
    }

    async fn aws_instance_types(&self, region: &str, min_vcpus: u32, min_memory_gb: u32) -> Result<Vec<AwsInstanceType>, ApiError> {
        self.record(format!("aws_types:{}:{}:{}", region, min_vcpus, min_memory_gb));
        self.aws_types.lock().unwrap().clone()
    }

    async fn create_gcp_instances(&self, request: &GcpCreateRequest) -> Result<Value, ApiError> {
        self.record("create_gcp".into());
        self.created.lock().unwrap().push(CreateRequest::Gcp(request.clone()));
        self.creation_delay().await;
        self.create_result.lock().unwrap().clone()
    }

    async fn create_aws_instances(&self, request: &AwsCreateRequest) -> Result<Value, ApiError> {
        self.record("create_aws".into());
        self.created.lock().unwrap().push(CreateRequest::Aws(request.clone()));
        self.creation_delay().await;
        self.create_result.lock().unwrap().clone()
    }
}

/// Scripted prompt: answers every confirmation with `answer` and records
/// questions and notifications.
pub struct ScriptedPrompt {
    pub answer: bool,
    pub questions: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            questions: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

pub fn list<T>(instances: Vec<T>) -> ListResponse<T> {
    ListResponse {
        success: true,
        count: Some(instances.len() as u64),
        instances: Some(instances),
    }
}

pub fn failed_list<T>() -> ListResponse<T> {
    ListResponse {
        success: false,
        count: None,
        instances: None,
    }
}

pub fn gcp_vm(name: &str, status: &str) -> GcpInstance {
    GcpInstance {
        name: name.into(),
        zone: "europe-west1-b".into(),
        machine_type: "e2-medium".into(),
        status: status.into(),
        external_ips: vec!["1.2.3.4".into()],
    }
}

pub fn aws_vm(id: &str, state: &str) -> AwsInstance {
    AwsInstance {
        instance_id: id.into(),
        name: Some(format!("{}-name", id)),
        public_ip_address: Some("5.6.7.8".into()),
        state: Some(AwsInstanceState { name: state.into() }),
    }
}

pub fn gcp_type(name: &str, cpus: u32, ram_gb: f64) -> GcpMachineType {
    GcpMachineType { name: name.into(), cpus, ram_gb }
}

pub fn aws_type(name: &str, vcpus: u32, memory_gb: f64) -> AwsInstanceType {
    AwsInstanceType { instance_type: name.into(), vcpus, memory_gb }
}
