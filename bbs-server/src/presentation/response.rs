use crate::domain::ApiError;
use actix_web::http::StatusCode;
use actix_web::{error, web, HttpResponse};
use bbs_client::UpstreamResponse;
use serde_json::json;

const JSON_CONTENT_TYPE: &str = "application/json";

fn detail(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message.into() }))
}

// Преобразование ApiError в HttpResponse
pub fn error_to_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::UpstreamHttp {
            status,
            body,
            content_type,
        } => {
            tracing::debug!("Relaying upstream error status {}", status);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status)
                .content_type(content_type.unwrap_or_else(|| JSON_CONTENT_TYPE.to_string()))
                .body(body)
        }
        other => {
            let status = StatusCode::from_u16(other.to_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!("Request failed with {}: {}", status, other);
            } else {
                tracing::debug!("Request rejected with {}: {}", status, other);
            }
            detail(status, other.to_string())
        }
    }
}

/// Upstream success is relayed byte for byte.
pub fn upstream_to_response(resp: UpstreamResponse) -> HttpResponse {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::OK);
    HttpResponse::build(status)
        .content_type(resp.content_type.unwrap_or_else(|| JSON_CONTENT_TYPE.to_string()))
        .body(resp.body)
}

/// Malformed JSON bodies get the same `detail` envelope as other 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = detail(StatusCode::BAD_REQUEST, format!("invalid JSON body: {}", err));
        error::InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = detail(StatusCode::BAD_REQUEST, format!("invalid query: {}", err));
        error::InternalError::from_response(err, response).into()
    })
}
