use crate::domain::user::NewUser;
use crate::domain::{ApiError, User};
use crate::infrastructure::store::{StoreClient, StoreError};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
}

pub struct StoreUserRepository {
    store: StoreClient,
}

impl StoreUserRepository {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, ApiError> {
        let row = NewUser {
            username,
            password_hash,
        };

        let mut users: Vec<User> = self.store.insert("users", &row).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => {
                ApiError::Conflict("username is already taken".to_string())
            }
            other => {
                tracing::error!("Failed to create user: {}", other);
                ApiError::from(other)
            }
        })?;

        users
            .pop()
            .ok_or_else(|| ApiError::Store("insert into users returned no row".to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let filter = format!("eq.{}", username);
        let mut users: Vec<User> = self
            .store
            .select(
                "users",
                &[
                    ("select", "id,username,password"),
                    ("username", filter.as_str()),
                    ("limit", "1"),
                ],
            )
            .await?;

        Ok(users.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_rt::test]
    async fn find_by_username_filters_on_exact_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .and(query_param("select", "id,username,password"))
            .and(query_param("username", "eq.alice"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 3, "username": "alice", "password": "$2b$04$hash" }
            ])))
            .mount(&server)
            .await;

        let repo = StoreUserRepository::new(StoreClient::new(&server.uri(), "k").unwrap());
        let user = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.password_hash, "$2b$04$hash");
    }

    #[actix_rt::test]
    async fn find_by_username_returns_none_for_empty_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let repo = StoreUserRepository::new(StoreClient::new(&server.uri(), "k").unwrap());
        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn create_writes_hash_into_password_column() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/users"))
            .and(body_json(json!({ "username": "bob", "password": "$2b$04$xyz" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([
                { "id": 9, "username": "bob", "password": "$2b$04$xyz" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = StoreUserRepository::new(StoreClient::new(&server.uri(), "k").unwrap());
        let user = repo.create("bob", "$2b$04$xyz").await.unwrap();

        assert_eq!(user.id, 9);
    }

    #[actix_rt::test]
    async fn create_maps_unique_violation_to_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "code": "23505" })))
            .mount(&server)
            .await;

        let repo = StoreUserRepository::new(StoreClient::new(&server.uri(), "k").unwrap());
        let err = repo.create("bob", "hash").await.unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
