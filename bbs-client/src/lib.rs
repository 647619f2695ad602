//! Client for a BBS HTTP API (`/api/bbs/*`, `/api/auth/*`).
//!
//! Used by the gateway in proxy mode and by the command-line tool.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::{error_chain, UpstreamError};
pub use http_client::{UpstreamClient, CLIENT_IP_HEADER, CONNECT_TIMEOUT, READ_TIMEOUT, USER_AGENT};
pub use models::{Credentials, PostRequest, UpstreamResponse};
