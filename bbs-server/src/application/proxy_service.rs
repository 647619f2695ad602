use crate::domain::{ApiError, BbsRequest};
use bbs_client::{UpstreamClient, UpstreamResponse};

/// Behaviour that differs between deployments of the proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProxyPolicy {
    /// Reject post creation (401) unless both username and password are sent.
    pub require_post_credentials: bool,
}

pub struct ProxyService {
    client: UpstreamClient,
    policy: ProxyPolicy,
}

impl ProxyService {
    pub fn new(client: UpstreamClient, policy: ProxyPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn list_posts(&self) -> Result<UpstreamResponse, ApiError> {
        self.client.list_posts().await.map_err(|e| {
            tracing::error!("Upstream list_posts failed: {}", e);
            ApiError::from(e)
        })
    }

    pub async fn create_post(
        &self,
        req: BbsRequest,
        client_ip: &str,
    ) -> Result<UpstreamResponse, ApiError> {
        req.require_body()?;
        if self.policy.require_post_credentials {
            req.require_credentials()?;
        }

        self.client
            .create_post(&req.post_request(), client_ip)
            .await
            .map_err(|e| {
                tracing::error!("Upstream create_post failed: {}", e);
                ApiError::from(e)
            })
    }

    pub async fn login(&self, req: BbsRequest) -> Result<UpstreamResponse, ApiError> {
        self.client.login(&req.credentials()).await.map_err(|e| {
            tracing::warn!("Upstream login failed for {}: {}", req.username, e);
            ApiError::from(e)
        })
    }

    pub async fn register(&self, req: BbsRequest) -> Result<UpstreamResponse, ApiError> {
        self.client.register(&req.credentials()).await.map_err(|e| {
            tracing::warn!("Upstream register failed for {}: {}", req.username, e);
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_rt::test]
    async fn invalid_post_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bbs/post"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let proxy = ProxyService::new(
            UpstreamClient::new(server.uri()).unwrap(),
            ProxyPolicy {
                require_post_credentials: true,
            },
        );

        let blank =
            BbsRequest::from_json(&json!({ "username": "a", "password": "b", "body": " " }));
        assert!(matches!(
            proxy.create_post(blank, "1.2.3.4").await,
            Err(ApiError::Validation(_))
        ));

        let anonymous = BbsRequest::from_json(&json!({ "body": "hi" }));
        assert!(matches!(
            proxy.create_post(anonymous, "1.2.3.4").await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[actix_rt::test]
    async fn lenient_policy_forwards_anonymous_posts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bbs/post"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = ProxyService::new(
            UpstreamClient::new(server.uri()).unwrap(),
            ProxyPolicy::default(),
        );

        let anonymous = BbsRequest::from_json(&json!({ "body": "hi" }));
        let response = proxy.create_post(anonymous, "unknown").await.unwrap();
        assert_eq!(response.status, 200);
    }
}
