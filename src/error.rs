use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors returned by backend calls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Non-2xx status. `message` is lifted from the body when it has one.
    #[error("Backend returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose envelope reported `success: false`.
    #[error("Backend rejected the request{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected { message: Option<String> },
}

impl ApiError {
    /// The message carried by the error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Transport(m) | ApiError::Decode(m) => Some(m.as_str()).filter(|m| !m.is_empty()),
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
        }
    }

    /// Text suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        self.message().unwrap_or(GENERIC_ERROR_MESSAGE).to_string()
    }
}

/// Reasons a creation submission is refused before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateError {
    #[error("A creation request is already in flight")]
    InFlight,

    #[error("Count must be at least 1")]
    InvalidCount,

    #[error("No instance type selected")]
    MissingType,
}
