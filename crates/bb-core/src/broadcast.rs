//! # Broadcaster
//!
//! Fan-out of board events to all live observers.
//!
//! The connection registry maps subscriber ids to unbounded channels.
//! New subscribers see only events published after they joined; the
//! initial board state comes from `BoardService::list_posts`, never
//! from here. A dead observer is dropped during publish and never
//! affects the publisher or the other observers.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Comment, Post};

/// Event delivered to every observer connected at publish time.
/// Tag values keep the original wire event names (`newPost`,
/// `newComment`) so clients need no translation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum BoardEvent {
    NewPost(Post),
    #[serde(rename_all = "camelCase")]
    NewComment { post_id: u64, comment: Comment },
}

/// Unique handle for one live observer connection.
///
/// Each subscription gets its own id so a closing connection can be
/// removed precisely, even when the same client reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Default)]
pub struct Broadcaster {
    subscribers: RwLock<HashMap<SubscriberId, UnboundedSender<BoardEvent>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer. No replay: the receiver only yields
    /// events published after this call returns.
    pub async fn subscribe(&self) -> (SubscriberId, UnboundedReceiver<BoardEvent>) {
        let (tx, rx) = unbounded_channel();
        let id = SubscriberId::new();
        self.subscribers.write().await.insert(id, tx);
        log::debug!("observer {id:?} subscribed");
        (id, rx)
    }

    /// Deregisters an observer. Idempotent: unsubscribing an unknown
    /// or already-removed id is a no-op.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.write().await.remove(&id).is_some() {
            log::debug!("observer {id:?} unsubscribed");
        }
    }

    /// Delivers the event to every live observer, dropping senders
    /// whose receiving side has gone away. Never fails.
    pub async fn publish(&self, event: BoardEvent) {
        let mut subscribers = self.subscribers.write().await;
        let before = subscribers.len();
        subscribers.retain(|_, tx| tx.send(event.clone()).is_ok());
        let dropped = before - subscribers.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} dead observers during publish, {} active", subscribers.len());
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}
