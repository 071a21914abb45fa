use askama::Template;

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmationTemplate {
    pub backend_hostname: String,
    pub active_page: String,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,

    pub title: String,
    pub message: String,
    pub target_url: String,
    pub confirm_label: String,
    pub cancel_url: String,
    pub hidden_fields: Vec<(String, String)>,
}

crate::impl_base_template!(ConfirmationTemplate);
