use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("label not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not found",
            StoreError::InvalidInput(_) => "invalid",
        }
    }
}

/// JSON error body returned by the label endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl ErrorBody {
    pub fn path_not_found() -> Self {
        Self::new("not found", "path not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new("method not allowed", "method not allowed")
    }
}

impl From<&StoreError> for ErrorBody {
    fn from(e: &StoreError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

/// Decode a JSON request body, rejecting a missing one.
pub fn decode_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T, StoreError> {
    let body = body.ok_or_else(|| StoreError::InvalidInput("request body required".into()))?;
    serde_json::from_value(body)
        .map_err(|e| StoreError::InvalidInput(format!("invalid request body: {e}")))
}
