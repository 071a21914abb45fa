use super::{DeleteTarget, Instance};

/// Pre-rendered row of the instance listing page.
#[derive(Clone, Debug)]
pub struct InstanceView {
    pub title: String,
    pub subtitle: String,
    pub ip_display: String,
    pub status: String,
    pub badge_class: &'static str,
    /// Empty when the row cannot be deleted.
    pub delete_url: String,
}

impl InstanceView {
    pub fn from_instance(instance: &Instance) -> Self {
        let badge_class = crate::utils::status_badge_class(instance.is_running());
        Self {
            title: instance.title().to_string(),
            subtitle: instance.subtitle(),
            ip_display: instance.ip_display(),
            status: instance.status().to_string(),
            badge_class,
            delete_url: instance
                .delete_target()
                .map(|t| confirm_delete_url(&t))
                .unwrap_or_default(),
        }
    }

    pub fn can_delete(&self) -> bool {
        !self.delete_url.is_empty()
    }
}

/// Link to the confirmation page for deleting `target`.
pub fn confirm_delete_url(target: &DeleteTarget) -> String {
    format!(
        "/instances/confirm-delete/{}?{}",
        target.provider().as_str(),
        crate::utils::build_query_string(&target.query_pairs())
    )
}
