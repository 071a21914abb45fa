use serde::{Deserialize, Serialize};
use std::fmt;

/// The two cloud vendors the console drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gcp,
    Aws,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gcp => "gcp",
            Provider::Aws => "aws",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::Gcp => "GCP",
            Provider::Aws => "AWS",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for Provider {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "gcp" => Ok(Provider::Gcp),
            "aws" => Ok(Provider::Aws),
            _ => Err(format!("Invalid provider: {}", value)),
        }
    }
}
