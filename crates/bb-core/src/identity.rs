//! Anonymous display-name allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues `"AnonymousN"` names: N starts at 1 and increments by exactly
/// one per call, shared across text and file posts, never reused.
///
/// This counter is independent of the post-id counter; both are
/// monotonic but nothing requires them to stay equal.
#[derive(Debug, Default)]
pub struct AnonNameAllocator {
    next: AtomicU64,
}

impl AnonNameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("Anonymous{n}")
    }
}
