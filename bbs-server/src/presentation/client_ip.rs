use actix_web::HttpRequest;
use bbs_client::CLIENT_IP_HEADER;

pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Address of the browser behind any proxies, in order of trust:
/// an already-forwarded original IP, the first `X-Forwarded-For` hop,
/// then the socket peer.
pub fn resolve_client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

    resolve(
        header(CLIENT_IP_HEADER),
        header(FORWARDED_FOR_HEADER),
        req.peer_addr().map(|addr| addr.ip().to_string()),
    )
}

fn resolve(original: Option<&str>, forwarded_for: Option<&str>, peer: Option<String>) -> String {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    original
        .and_then(non_empty)
        .or_else(|| forwarded_for.and_then(|v| v.split(',').next()).and_then(non_empty))
        .or_else(|| peer.as_deref().and_then(non_empty))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
