use crate::data::user_repository::UserRepository;
use crate::domain::user::{validate_registration, LoginResponse};
use crate::domain::ApiError;
use crate::infrastructure::password::{hash_password, verify_password};
use bbs_client::Credentials;
use std::sync::Arc;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository + Send + Sync>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, creds: Credentials) -> Result<(), ApiError> {
        tracing::debug!("Registration attempt for username: {}", creds.username);

        validate_registration(&creds)?;

        if self
            .user_repo
            .find_by_username(&creds.username)
            .await
            .map_err(|e| e.context("failed to look up user"))?
            .is_some()
        {
            tracing::warn!("Registration failed: username {} already exists", creds.username);
            return Err(ApiError::Conflict("username is already taken".to_string()));
        }

        let password_hash = hash_password(creds.password, self.bcrypt_cost).await?;

        // A concurrent registration can still win the race; the store's unique
        // constraint reports it as a conflict.
        let user = self
            .user_repo
            .create(&creds.username, &password_hash)
            .await
            .map_err(|e| e.context("failed to create user"))?;

        tracing::info!(
            "User registered successfully: id={}, username={}",
            user.id,
            user.username
        );
        Ok(())
    }

    pub async fn login(&self, creds: Credentials) -> Result<LoginResponse, ApiError> {
        tracing::debug!("Login attempt for username: {}", creds.username);

        let user = match self
            .user_repo
            .find_by_username(&creds.username)
            .await
            .map_err(|e| e.context("failed to look up user"))?
        {
            Some(user) => user,
            None => {
                tracing::warn!("User not found: {}", creds.username);
                return Err(ApiError::Unauthorized("user does not exist".to_string()));
            }
        };

        if !verify_password(creds.password, user.password_hash).await? {
            tracing::warn!("Invalid password for user {}", user.username);
            return Err(ApiError::Unauthorized("wrong password".to_string()));
        }

        tracing::info!(
            "User logged in successfully: id={}, username={}",
            user.id,
            creds.username
        );

        Ok(LoginResponse {
            success: true,
            user_id: user.id,
            username: creds.username,
        })
    }
}
