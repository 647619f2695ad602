//! Handlers for store mode: registration, login and posts backed by the
//! managed database.

use crate::application::{AuthService, BoardService};
use crate::domain::post::PostResponse;
use crate::domain::BbsRequest;
use crate::presentation::response::error_to_response;
use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use std::sync::Arc;

#[derive(serde::Serialize)]
struct SuccessResponse {
    success: bool,
}

// Структура для ответа со списком постов
#[derive(serde::Serialize)]
struct PostsResponse {
    posts: Vec<PostResponse>,
}

#[derive(serde::Deserialize)]
pub struct PosterQuery {
    pub user_id: Option<i64>,
}

// ============== Auth Handlers ==============

pub async fn register(
    auth_service: web::Data<Arc<AuthService>>,
    payload: web::Json<Value>,
) -> impl Responder {
    let req = BbsRequest::from_json(&payload);

    match auth_service.register(req.credentials()).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse { success: true }),
        Err(err) => error_to_response(err),
    }
}

pub async fn login(
    auth_service: web::Data<Arc<AuthService>>,
    payload: web::Json<Value>,
) -> impl Responder {
    let req = BbsRequest::from_json(&payload);

    match auth_service.login(req.credentials()).await {
        Ok(login) => HttpResponse::Ok().json(login),
        Err(err) => error_to_response(err),
    }
}

// ============== Post Handlers ==============

pub async fn list_posts(board_service: web::Data<Arc<BoardService>>) -> impl Responder {
    match board_service.list_posts().await {
        Ok(posts) => HttpResponse::Ok().json(PostsResponse { posts }),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_post(
    board_service: web::Data<Arc<BoardService>>,
    query: web::Query<PosterQuery>,
    payload: web::Json<Value>,
) -> impl Responder {
    let req = BbsRequest::from_json(&payload);

    tracing::info!("Creating post for user_id={:?}", query.user_id);

    match board_service.create_post(query.user_id, req).await {
        Ok(()) => HttpResponse::Ok().json(SuccessResponse { success: true }),
        Err(err) => error_to_response(err),
    }
}
