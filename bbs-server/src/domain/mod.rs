pub mod error;
pub mod post;
pub mod request;
pub mod user;

pub use error::ApiError;
pub use post::Post;
pub use request::BbsRequest;
pub use user::User;
