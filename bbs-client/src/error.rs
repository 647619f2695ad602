use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status. The body is kept as raw bytes
    /// so it can be relayed unchanged.
    #[error("upstream returned HTTP {status}: {}", String::from_utf8_lossy(.body))]
    Http {
        status: u16,
        body: Vec<u8>,
        content_type: Option<String>,
    },

    // DNS, connect refused, timeouts, broken streams
    #[error("{0}")]
    Unreachable(String),

    #[error("{0}")]
    Unexpected(String),
}

impl UpstreamError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, UpstreamError::Unreachable(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        let text = error_chain(&err);
        if err.is_builder() || err.is_decode() {
            Self::Unexpected(text)
        } else {
            Self::Unreachable(text)
        }
    }
}

/// reqwest hides the interesting part ("Connection refused", "operation timed
/// out") in the source chain, so flatten it into one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
