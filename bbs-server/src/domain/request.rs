use crate::domain::ApiError;
use bbs_client::{Credentials, PostRequest};
use serde_json::Value;

/// Normalized view of an inbound BBS JSON payload.
///
/// Missing or non-string fields become empty strings. `username` falls back
/// to `name`, and `body` is trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BbsRequest {
    pub username: String,
    pub password: String,
    pub body: String,
}

impl BbsRequest {
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default();

        let username = match field("username") {
            "" => field("name"),
            name => name,
        };

        Self {
            username: username.to_string(),
            password: field("password").to_string(),
            body: field("body").trim().to_string(),
        }
    }

    pub fn require_body(&self) -> Result<(), ApiError> {
        if self.body.is_empty() {
            return Err(ApiError::Validation("post body is empty".to_string()));
        }
        Ok(())
    }

    pub fn require_credentials(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::Unauthorized(
                "username and password are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Username to store alongside a post, `None` when the caller sent none.
    pub fn author(&self) -> Option<String> {
        (!self.username.is_empty()).then(|| self.username.clone())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn post_request(&self) -> PostRequest {
        PostRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            body: self.body.clone(),
        }
    }
}
