use crate::error::UpstreamError;
use crate::models::{Credentials, PostRequest, UpstreamResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const READ_TIMEOUT: Duration = Duration::from_secs(8);

pub const USER_AGENT: &str = concat!("bbs-gateway/", env!("CARGO_PKG_VERSION"));

/// Header carrying the browser's address on post creation.
pub const CLIENT_IP_HEADER: &str = "X-Original-Client-IP";

pub const POSTS_PATH: &str = "/api/bbs/posts";
pub const POST_PATH: &str = "/api/bbs/post";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

/// One outbound call per operation, no retries.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        Self::with_read_timeout(base_url, READ_TIMEOUT)
    }

    /// Same as [`new`](Self::new) with a different read timeout.
    pub fn with_read_timeout(
        base_url: impl Into<String>,
        read_timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(read_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                UpstreamError::Unexpected(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn list_posts(&self) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(POSTS_PATH);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    pub async fn create_post(
        &self,
        req: &PostRequest,
        client_ip: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.create_post_as(req, client_ip, None).await
    }

    /// Like [`create_post`](Self::create_post), but also passes the poster's
    /// id as `?user_id=` for servers that identify callers that way.
    pub async fn create_post_as(
        &self,
        req: &PostRequest,
        client_ip: &str,
        user_id: Option<i64>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(POST_PATH);
        tracing::debug!("POST {} (client_ip={}, user_id={:?})", url, client_ip, user_id);

        let mut request = self.client.post(&url).header(CLIENT_IP_HEADER, client_ip);
        if let Some(user_id) = user_id {
            request = request.query(&[("user_id", user_id)]);
        }

        let response = request.json(req).send().await?;
        self.handle_response(response).await
    }

    pub async fn login(&self, req: &Credentials) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(LOGIN_PATH);
        tracing::debug!("POST {} (username={})", url, req.username);

        let response = self.client.post(&url).json(req).send().await?;
        self.handle_response(response).await
    }

    pub async fn register(&self, req: &Credentials) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(REGISTER_PATH);
        tracing::debug!("POST {} (username={})", url, req.username);

        let response = self.client.post(&url).json(req).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            tracing::warn!("Upstream answered {} ({} bytes)", status, body.len());
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                body,
                content_type,
            });
        }

        // Only check that it is JSON; the bytes themselves are passed on untouched.
        serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(|e| {
            tracing::error!("Upstream answered {} with a non-JSON body: {}", status, e);
            UpstreamError::Unexpected(format!("upstream returned invalid JSON: {}", e))
        })?;

        Ok(UpstreamResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
