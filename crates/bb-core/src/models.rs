//! # Domain Models
//!
//! These structs represent the core entities of Bubble-Board.
//! Post ids are small monotonic integers rather than UUIDs: the board
//! is ephemeral and entirely in-memory, and clients rely on the dense
//! `1..N` numbering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single anonymous contribution to the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Strictly increasing, starts at 1, never reused.
    pub id: u64,
    /// Auto-assigned display name (e.g. "Anonymous7"), immutable.
    pub name: String,
    /// Text or file payload; the variant fixes which fields exist.
    #[serde(flatten)]
    pub body: PostBody,
    /// Append-only; insertion order is display order.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// What a post carries. Tagged so a file post can never half-populate
/// text fields and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostBody {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    File {
        /// Public locator returned by the content store.
        file: String,
        mime_type: String,
        original_name: String,
    },
    /// A file submission that arrived without a blob. Accepted as-is.
    Unknown,
}

/// A text reply attached to exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// `"<post id>-<per-post sequence>"`, unique within its post.
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// What the content store hands back for a stored blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    /// Public locator (e.g. "/uploads/<uuid>.png").
    pub file: String,
    pub mime_type: String,
    pub original_name: String,
}

/// A raw upload on its way into the content store.
#[derive(Debug, Clone)]
pub struct Upload {
    pub data: Vec<u8>,
    pub original_name: String,
    /// Media type as declared by the client, if any.
    pub content_type: Option<String>,
}
