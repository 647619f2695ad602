use bbs_client::UpstreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    /// Upstream rejected the call; status and body are relayed as-is.
    #[error("upstream returned HTTP {status}")]
    UpstreamHttp {
        status: u16,
        body: Vec<u8>,
        content_type: Option<String>,
    },

    #[error("upstream BBS API unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Conflict(_) => 409,
            Self::UpstreamHttp { status, .. } => *status,
            Self::UpstreamUnreachable(_) => 503,
            Self::Store(_) | Self::Unexpected(_) => 500,
        }
    }

    /// Turns a raw store failure into an unexpected error prefixed with what
    /// was being attempted. Other kinds pass through untouched.
    pub fn context(self, what: &str) -> Self {
        match self {
            Self::Store(msg) => Self::Unexpected(format!("{}: {}", what, msg)),
            other => other,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Http {
                status,
                body,
                content_type,
            } => Self::UpstreamHttp {
                status,
                body,
                content_type,
            },
            UpstreamError::Unreachable(msg) => Self::UpstreamUnreachable(msg),
            UpstreamError::Unexpected(msg) => {
                Self::Unexpected(format!("unexpected upstream failure: {}", msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::Validation("x".into()).to_status_code(), 400);
        assert_eq!(ApiError::Unauthorized("x".into()).to_status_code(), 401);
        assert_eq!(ApiError::Conflict("x".into()).to_status_code(), 409);
        assert_eq!(ApiError::UpstreamUnreachable("x".into()).to_status_code(), 503);
        assert_eq!(ApiError::Store("x".into()).to_status_code(), 500);
        assert_eq!(ApiError::Unexpected("x".into()).to_status_code(), 500);
        assert_eq!(
            ApiError::UpstreamHttp {
                status: 422,
                body: vec![],
                content_type: None
            }
            .to_status_code(),
            422
        );
    }

    #[test]
    fn unreachable_upstream_keeps_original_text() {
        let err = ApiError::from(UpstreamError::Unreachable("connection refused".into()));
        assert_eq!(
            err.to_string(),
            "upstream BBS API unreachable: connection refused"
        );
    }

    #[test]
    fn context_only_rewrites_store_errors() {
        let err = ApiError::Store("timeout".into()).context("failed to fetch posts");
        assert!(matches!(
            err,
            ApiError::Unexpected(ref m) if m == "failed to fetch posts: timeout"
        ));

        let err = ApiError::Conflict("taken".into()).context("failed to register");
        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
