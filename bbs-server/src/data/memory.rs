//! In-memory repositories for handler and service tests.

use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::post::NewPost;
use crate::domain::{ApiError, Post, User};
use async_trait::async_trait;
use chrono::SecondsFormat;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(ApiError::Conflict("username is already taken".to_string()));
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    failing: bool,
}

impl InMemoryPostRepository {
    /// Every call fails as if the store were down.
    pub fn failing() -> Self {
        Self {
            posts: Mutex::default(),
            failing: true,
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        if self.failing {
            return Err(ApiError::Store("connection reset".to_string()));
        }

        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: posts.len() as i64 + 1,
            username: post.username,
            body: post.body,
            // Fixed width, so string order is time order.
            created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<Post>, ApiError> {
        if self.failing {
            return Err(ApiError::Store("connection reset".to_string()));
        }

        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| (&b.created_at, b.id).cmp(&(&a.created_at, a.id)));
        Ok(posts)
    }
}
