use crate::error::UpstreamError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRequest {
    pub username: String,
    pub password: String,
    pub body: String,
}

/// Successful upstream reply. `body` holds the exact bytes the upstream sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn json(&self) -> Result<serde_json::Value, UpstreamError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| UpstreamError::Unexpected(format!("invalid JSON from upstream: {}", e)))
    }
}
