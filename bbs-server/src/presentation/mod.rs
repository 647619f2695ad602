pub mod client_ip;
pub mod http_handlers;
pub mod proxy_handlers;
pub mod response;
pub mod routes;
