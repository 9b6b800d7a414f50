//! # BoardService
//!
//! The ingestion boundary: every operation validates its input,
//! mutates the registry, then publishes. Publishing happens strictly
//! after the registry write and can never fail or roll back the
//! request that triggered it.

use std::sync::Arc;

use crate::broadcast::{BoardEvent, Broadcaster};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post, PostBody, Upload};
use crate::registry::PostRegistry;
use crate::traits::ContentStore;

pub struct BoardService {
    registry: PostRegistry,
    broadcaster: Broadcaster,
    store: Arc<dyn ContentStore>,
}

impl BoardService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            registry: PostRegistry::new(),
            broadcaster: Broadcaster::new(),
            store,
        }
    }

    /// Observer registration lives on the broadcaster; connection
    /// handlers subscribe and unsubscribe through this.
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Creates a file post. The blob is stored before the registry is
    /// touched, so a post never references an unstored blob and a
    /// storage failure surfaces with no state change. A submission
    /// without a blob is accepted and recorded with an unknown body.
    pub async fn submit_file_post(&self, upload: Option<Upload>) -> Result<Post> {
        let body = match upload {
            Some(upload) => {
                let file = self
                    .store
                    .store(upload)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;
                PostBody::File {
                    file: file.file,
                    mime_type: file.mime_type,
                    original_name: file.original_name,
                }
            }
            None => PostBody::Unknown,
        };
        let post = self.registry.create_post(body).await;
        self.broadcaster
            .publish(BoardEvent::NewPost(post.clone()))
            .await;
        Ok(post)
    }

    /// Creates a text post from trimmed, non-blank input.
    pub async fn submit_text_post(&self, text: &str) -> Result<Post> {
        let text = non_blank(text)?;
        let post = self.registry.create_post(PostBody::Text { text }).await;
        self.broadcaster
            .publish(BoardEvent::NewPost(post.clone()))
            .await;
        Ok(post)
    }

    /// Appends a comment to an existing post and announces it.
    pub async fn add_comment(&self, post_id: u64, text: &str) -> Result<Comment> {
        let text = non_blank(text)?;
        let comment = self.registry.add_comment(post_id, text).await?;
        self.broadcaster
            .publish(BoardEvent::NewComment {
                post_id,
                comment: comment.clone(),
            })
            .await;
        Ok(comment)
    }

    /// Pure snapshot read, no broadcast. Historical state for newly
    /// connected clients comes from here, never from the broadcaster.
    pub async fn list_posts(&self) -> Vec<Post> {
        self.registry.list_posts().await
    }

    pub async fn find_post(&self, post_id: u64) -> Option<Post> {
        self.registry.find_post(post_id).await
    }
}

fn non_blank(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    Ok(trimmed.to_string())
}
