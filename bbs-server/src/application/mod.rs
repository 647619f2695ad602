pub mod auth_service;
pub mod board_service;
pub mod proxy_service;

pub use auth_service::AuthService;
pub use board_service::BoardService;
pub use proxy_service::ProxyService;
