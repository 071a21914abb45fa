// Base template trait shared by all pages
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod instances_page_template;
pub mod create_page_template;
pub mod confirmation_template;

pub use instances_page_template::InstancesPageTemplate;
pub use create_page_template::{CreatePageTemplate, TypeOption};
pub use confirmation_template::ConfirmationTemplate;
