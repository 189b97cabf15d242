use serde::{Deserialize, Serialize};

/// Body returned by the prediction service alongside a 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Decodes an error body, yielding `None` for empty or non-conforming payloads.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let parsed: Self = serde_json::from_slice(body).ok()?;
        if parsed.error.trim().is_empty() {
            None
        } else {
            Some(parsed)
        }
    }
}
