use crate::domain::ApiError;
use bbs_client::Credentials;
use serde::{Deserialize, Serialize};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    // the store column is called `password` but only ever holds the bcrypt hash
    #[serde(rename = "password")]
    pub password_hash: String,
}

#[derive(Debug, Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    #[serde(rename = "password")]
    pub password_hash: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user_id: i64,
    pub username: String,
}

pub fn validate_registration(creds: &Credentials) -> Result<(), ApiError> {
    if creds.username.chars().count() < MIN_USERNAME_CHARS
        || creds.password.chars().count() < MIN_PASSWORD_CHARS
    {
        return Err(ApiError::Validation(format!(
            "input too short: username needs at least {} characters and password at least {}",
            MIN_USERNAME_CHARS, MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}
