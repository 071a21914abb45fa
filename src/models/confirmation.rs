use serde::Deserialize;

use super::{DeleteTarget, Provider};

/// Query/form fields that identify the instance a delete applies to.
/// GCP uses `name`/`zone`, AWS uses `id`/`region`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct DeleteForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Set to `yes` by the confirmation page's submit button.
    #[serde(default)]
    pub confirm: Option<String>,
}

impl DeleteForm {
    pub fn target(&self, provider: Provider) -> Option<DeleteTarget> {
        fn non_empty(v: &Option<String>) -> Option<String> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
        }
        match provider {
            Provider::Gcp => Some(DeleteTarget::Gcp {
                name: non_empty(&self.name)?,
                zone: non_empty(&self.zone),
            }),
            Provider::Aws => Some(DeleteTarget::Aws {
                id: non_empty(&self.id)?,
                region: non_empty(&self.region),
            }),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        crate::utils::parse_flag(self.confirm.as_deref(), false)
    }
}
