/// Fields shared by every console page.
pub trait BaseTemplate {
    fn backend_hostname(&self) -> &str;
    fn active_page(&self) -> &str;
    fn flash_messages(&self) -> &Vec<String>;
    fn has_flash_messages(&self) -> bool;
}

/// Macro to implement BaseTemplate for a struct with standard fields
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn backend_hostname(&self) -> &str {
                &self.backend_hostname
            }
            fn active_page(&self) -> &str {
                &self.active_page
            }
            fn flash_messages(&self) -> &Vec<String> {
                &self.flash_messages
            }
            fn has_flash_messages(&self) -> bool {
                self.has_flash_messages
            }
        }
    };
}
