use crate::data::post_repository::PostRepository;
use crate::domain::post::{NewPost, PostResponse};
use crate::domain::{ApiError, BbsRequest};
use std::sync::Arc;

pub struct BoardService {
    post_repo: Arc<dyn PostRepository + Send + Sync>,
}

impl BoardService {
    pub fn new(post_repo: Arc<dyn PostRepository + Send + Sync>) -> Self {
        Self { post_repo }
    }

    /// Body is checked before identity, so an empty post is a 400 even for
    /// anonymous callers.
    pub async fn create_post(
        &self,
        user_id: Option<i64>,
        req: BbsRequest,
    ) -> Result<(), ApiError> {
        req.require_body()?;

        let user_id = match user_id {
            Some(id) if id != 0 => id,
            _ => return Err(ApiError::Unauthorized("please log in".to_string())),
        };

        let post = self
            .post_repo
            .create(NewPost::new(user_id, req.author(), req.body))
            .await
            .map_err(|e| e.context("failed to create post"))?;

        tracing::info!("Post created: id={}, user_id={}", post.id, user_id);
        Ok(())
    }

    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, ApiError> {
        let posts = self
            .post_repo
            .list()
            .await
            .map_err(|e| e.context("failed to fetch posts"))?;

        tracing::debug!("Listing {} posts", posts.len());
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }
}
