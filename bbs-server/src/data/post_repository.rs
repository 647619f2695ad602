use crate::domain::post::NewPost;
use crate::domain::{ApiError, Post};
use crate::infrastructure::store::StoreClient;
use async_trait::async_trait;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, ApiError>;
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, ApiError>;
}

pub struct StorePostRepository {
    store: StoreClient,
}

impl StorePostRepository {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for StorePostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        let mut rows: Vec<Post> = self.store.insert("posts", &post).await.map_err(|e| {
            tracing::error!("Failed to create post: {}", e);
            ApiError::from(e)
        })?;

        rows.pop()
            .ok_or_else(|| ApiError::Store("insert into posts returned no row".to_string()))
    }

    async fn list(&self) -> Result<Vec<Post>, ApiError> {
        let posts = self
            .store
            .select(
                "posts",
                &[
                    ("select", "id,username,body,created_at"),
                    ("order", "created_at.desc,id.desc"),
                ],
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to list posts: {}", e);
                ApiError::from(e)
            })?;

        Ok(posts)
    }
}
