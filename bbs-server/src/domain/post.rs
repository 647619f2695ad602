use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post. `created_at` is kept exactly as the store wrote it, since
/// columns without a time zone come back with no offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub username: Option<String>,
    pub body: String,
    pub created_at: String,
}

/// Row written on post creation. `created_at` is assigned by the server.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub user_id: i64,
    pub username: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(user_id: i64, username: Option<String>, body: String) -> Self {
        Self {
            user_id,
            username,
            body,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub username: Option<String>,
    pub body: String,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            username: post.username,
            body: post.body,
            created_at: post.created_at,
        }
    }
}
