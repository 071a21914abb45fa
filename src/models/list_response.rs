use serde::{Deserialize, Serialize};

/// `{success, count?, instances?}` envelope returned by both list endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: Option<u64>,
    pub instances: Option<Vec<T>>,
}

/// Type catalogs arrive either as a bare array or wrapped in an object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum CatalogEnvelope<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "machine_types", default = "Vec::new")]
        instance_types: Vec<T>,
    },
}

impl<T> CatalogEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            CatalogEnvelope::Bare(v) => v,
            CatalogEnvelope::Wrapped { instance_types } => instance_types,
        }
    }
}
