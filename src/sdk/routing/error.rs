use serde::Deserialize;
use thiserror::Error;

/// Error body FastAPI-style backends send with 4xx/5xx responses.
#[derive(Deserialize, Debug)]
pub struct BackendErrorPayload {
    pub detail: serde_json::Value,
}

impl BackendErrorPayload {
    pub fn describe(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}: {detail}")]
    StatusError { status: u16, detail: String },

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}
