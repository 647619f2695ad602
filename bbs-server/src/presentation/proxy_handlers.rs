//! Handlers for proxy mode. Every call is forwarded to the upstream BBS API
//! and its answer relayed unchanged.

use crate::application::ProxyService;
use crate::domain::{ApiError, BbsRequest};
use crate::presentation::client_ip::resolve_client_ip;
use crate::presentation::response::{error_to_response, upstream_to_response};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bbs_client::UpstreamResponse;
use serde_json::Value;
use std::sync::Arc;

pub async fn list_posts(proxy_service: web::Data<Arc<ProxyService>>) -> impl Responder {
    relay(proxy_service.list_posts().await)
}

pub async fn create_post(
    req: HttpRequest,
    proxy_service: web::Data<Arc<ProxyService>>,
    payload: web::Json<Value>,
) -> impl Responder {
    let client_ip = resolve_client_ip(&req);
    tracing::info!("Forwarding post from {}", client_ip);

    relay(
        proxy_service
            .create_post(BbsRequest::from_json(&payload), &client_ip)
            .await,
    )
}

pub async fn login(
    proxy_service: web::Data<Arc<ProxyService>>,
    payload: web::Json<Value>,
) -> impl Responder {
    relay(proxy_service.login(BbsRequest::from_json(&payload)).await)
}

pub async fn register(
    proxy_service: web::Data<Arc<ProxyService>>,
    payload: web::Json<Value>,
) -> impl Responder {
    relay(proxy_service.register(BbsRequest::from_json(&payload)).await)
}

fn relay(result: Result<UpstreamResponse, ApiError>) -> HttpResponse {
    match result {
        Ok(resp) => upstream_to_response(resp),
        Err(err) => error_to_response(err),
    }
}
