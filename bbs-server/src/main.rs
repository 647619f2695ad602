use dotenvy::dotenv;
use std::sync::Arc;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use application::{AuthService, BoardService, ProxyService};
use bbs_client::UpstreamClient;
use data::{post_repository::StorePostRepository, user_repository::StoreUserRepository};
use infrastructure::{
    config::{Backend, Config},
    logging::init_logging,
    store::StoreClient,
};
use presentation::routes::{self, Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    init_logging();

    let config = Config::from_env()?;
    let http_addr = config.http_addr();

    tracing::info!("Starting BBS server...");
    tracing::info!("HTTP server will listen on {}", http_addr);

    let services = build_services(&config)?;

    run_http_server(http_addr, services).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

fn build_services(config: &Config) -> anyhow::Result<Services> {
    tracing::info!("Initializing services...");

    let services = match &config.backend {
        Backend::Store {
            url,
            key,
            bcrypt_cost,
        } => {
            tracing::info!("Backend: managed store at {}", url);
            let store = StoreClient::new(url, key)?;

            // Repositories
            let user_repo = Arc::new(StoreUserRepository::new(store.clone()));
            let post_repo = Arc::new(StorePostRepository::new(store));

            Services::Store {
                auth_service: Arc::new(AuthService::new(user_repo, *bcrypt_cost)),
                board_service: Arc::new(BoardService::new(post_repo)),
            }
        }
        Backend::Proxy { base_url, policy } => {
            tracing::info!("Backend: upstream BBS API at {} ({:?})", base_url, policy);
            let client = UpstreamClient::new(base_url.clone())?;

            Services::Proxy {
                proxy_service: Arc::new(ProxyService::new(client, *policy)),
            }
        }
    };

    tracing::info!("Services initialized successfully");
    Ok(services)
}

async fn run_http_server(addr: String, services: Services) -> anyhow::Result<()> {
    use actix_web::{middleware::Logger, App, HttpServer};

    tracing::info!("Configuring HTTP server...");

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::configure(cfg, &services))
    })
    .bind(&addr)?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
