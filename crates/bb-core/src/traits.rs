//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::{FileRef, Upload};

/// Blob persistence contract for file posts.
///
/// Implementations must return a locator that stays valid for the
/// process lifetime; the core never re-reads the blob itself.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persists the blob and returns its public reference.
    async fn store(&self, upload: Upload) -> anyhow::Result<FileRef>;
}
