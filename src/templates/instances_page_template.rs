use askama::Template;
use crate::models::InstanceView;

#[derive(Template)]
#[template(path = "instances.html")]
pub struct InstancesPageTemplate<'a> {
    pub backend_hostname: String,
    pub active_page: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub gcp_instances: &'a [InstanceView],
    pub aws_instances: &'a [InstanceView],
    pub loading: bool,
    pub last_loaded: String,
}

crate::impl_base_template!(InstancesPageTemplate<'_>);
