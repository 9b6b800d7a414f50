//! # PostRegistry
//!
//! In-memory authoritative store of posts and their comments.
//!
//! All mutation goes through one write lock, which serializes post-id
//! allocation, anonymous-name allocation, and per-post comment
//! sequence numbers. Readers take the read lock and only ever see
//! fully constructed posts: a post is pushed in a single critical
//! section with its id, name, body, and empty comment list all set.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::identity::AnonNameAllocator;
use crate::models::{Comment, Post, PostBody};

#[derive(Default)]
pub struct PostRegistry {
    // Posts are only ever pushed, in id order, so index == id - 1.
    posts: RwLock<Vec<Post>>,
    names: AnonNameAllocator,
}

impl PostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id (strictly greater than all previously
    /// issued ids, starting at 1) and a fresh anonymous name, stores
    /// the post, and returns it. Never fails; input validation happens
    /// upstream in the service layer.
    pub async fn create_post(&self, body: PostBody) -> Post {
        let mut posts = self.posts.write().await;
        let post = Post {
            id: posts.len() as u64 + 1,
            name: self.names.next_name(),
            body,
            comments: Vec::new(),
            created_at: Utc::now(),
        };
        posts.push(post.clone());
        post
    }

    /// Snapshot of all posts in creation (ascending id) order, each
    /// with its comments in append order.
    pub async fn list_posts(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Point lookup by id.
    pub async fn find_post(&self, id: u64) -> Option<Post> {
        let posts = self.posts.read().await;
        posts.iter().find(|p| p.id == id).cloned()
    }

    /// Appends a comment with the next per-post sequence number.
    /// Comment ids are `"<post id>-<seq>"`; the seq is allocated under
    /// the write lock, so concurrent comments never collide.
    pub async fn add_comment(&self, post_id: u64, text: String) -> Result<Comment> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        let comment = Comment {
            id: format!("{}-{}", post_id, post.comments.len() + 1),
            text,
            created_at: Utc::now(),
        };
        post.comments.push(comment.clone());
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PostBody {
        PostBody::Text {
            text: s.to_string(),
        }
    }

    #[tokio::test]
    async fn ids_and_names_increment_together() {
        let registry = PostRegistry::new();
        let first = registry.create_post(text("a")).await;
        let second = registry.create_post(PostBody::Unknown).await;
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Anonymous1");
        assert_eq!(second.id, 2);
        assert_eq!(second.name, "Anonymous2");
    }

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let registry = PostRegistry::new();
        for i in 0..5 {
            registry.create_post(text(&i.to_string())).await;
        }
        let ids: Vec<u64> = registry.list_posts().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn comment_sequence_is_per_post() {
        let registry = PostRegistry::new();
        registry.create_post(text("a")).await;
        registry.create_post(text("b")).await;

        let c1 = registry.add_comment(1, "one".to_string()).await.unwrap();
        let c2 = registry.add_comment(1, "two".to_string()).await.unwrap();
        let c3 = registry.add_comment(2, "other".to_string()).await.unwrap();
        assert_eq!(c1.id, "1-1");
        assert_eq!(c2.id, "1-2");
        assert_eq!(c3.id, "2-1");

        let post = registry.find_post(1).await.unwrap();
        let texts: Vec<&str> = post.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn comment_on_unknown_post_is_not_found() {
        let registry = PostRegistry::new();
        let err = registry.add_comment(999, "hi".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("post", _)));
    }

    #[tokio::test]
    async fn find_post_on_empty_registry_is_none() {
        let registry = PostRegistry::new();
        assert!(registry.find_post(1).await.is_none());
    }
}
