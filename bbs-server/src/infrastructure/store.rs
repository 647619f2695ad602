//! Thin client for the managed database's REST interface (PostgREST wire
//! format, as exposed by Supabase).

use crate::domain::ApiError;
use bbs_client::{error_chain, CONNECT_TIMEOUT, READ_TIMEOUT, USER_AGENT};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("store request failed: {0}")]
    Request(String),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Request(error_chain(&err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    rest_url: String,
}

impl StoreClient {
    pub fn new(store_url: &str, store_key: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(store_key)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", store_key))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        let rest_url = format!("{}/rest/v1", store_url.trim_end_matches('/'));
        tracing::info!("Store client configured for {}", rest_url);

        Ok(Self { client, rest_url })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    /// Inserts one row and returns the stored representation.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<Vec<R>, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<Vec<R>>().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::CONFLICT || body.contains(UNIQUE_VIOLATION) {
        return Err(StoreError::UniqueViolation(body));
    }

    tracing::error!("Store answered {}: {}", status, body);
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
