use askama::Template;

/// One `<option>` of the type selector.
#[derive(Clone, Debug)]
pub struct TypeOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePageTemplate {
    pub backend_hostname: String,
    pub active_page: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,

    pub provider: String,
    pub is_gcp: bool,
    pub name: String,
    pub count: u32,
    /// Whether a password is stored; the password itself is never rendered.
    pub password_set: bool,
    pub location_label: String,
    pub location: String,
    pub min_cpus_label: String,
    pub min_cpus: u32,
    pub min_ram_label: String,
    pub min_ram: u32,
    pub type_label: String,
    pub type_options: Vec<TypeOption>,
    pub gcp_image_project: String,
    pub gcp_image_family: String,
    pub aws_image_id: String,
    pub submit_label: String,
    pub submitting: bool,
    /// Empty when there is no error to show.
    pub error: String,
    /// Empty when there is no result to show.
    pub result_json: String,
}

crate::impl_base_template!(CreatePageTemplate);
