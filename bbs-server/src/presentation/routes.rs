use crate::application::{AuthService, BoardService, ProxyService};
use crate::presentation::response::{json_config, query_config};
use crate::presentation::{http_handlers, proxy_handlers};
use actix_web::web;
use std::sync::Arc;

/// Services shared by every worker. Built once in `main`.
#[derive(Clone)]
pub enum Services {
    Store {
        auth_service: Arc<AuthService>,
        board_service: Arc<BoardService>,
    },
    Proxy {
        proxy_service: Arc<ProxyService>,
    },
}

pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(json_config()).app_data(query_config());

    match services {
        Services::Store {
            auth_service,
            board_service,
        } => {
            cfg.app_data(web::Data::new(auth_service.clone()))
                .app_data(web::Data::new(board_service.clone()))
                .service(
                    web::scope("/api/auth")
                        .route("/register", web::post().to(http_handlers::register))
                        .route("/login", web::post().to(http_handlers::login)),
                )
                .service(
                    web::scope("/api/bbs")
                        .route("/posts", web::get().to(http_handlers::list_posts))
                        .route("/post", web::post().to(http_handlers::create_post)),
                );
        }
        Services::Proxy { proxy_service } => {
            cfg.app_data(web::Data::new(proxy_service.clone()))
                .service(
                    web::scope("/api/auth")
                        .route("/register", web::post().to(proxy_handlers::register))
                        .route("/login", web::post().to(proxy_handlers::login)),
                )
                .service(
                    web::scope("/api/bbs")
                        .route("/posts", web::get().to(proxy_handlers::list_posts))
                        .route("/post", web::post().to(proxy_handlers::create_post)),
                );
        }
    }
}
