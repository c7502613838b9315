//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the stores and the
//! editor session.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// StoreEvent
// ---------------------------------------------------------------------------

/// Which part of the application state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Designers,
    Objects,
    Editor,
}

/// Kind of state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A request started; `loading` is now set.
    Loading,
    /// A fetch resolved and replaced the collection.
    Loaded,
    Created,
    Updated,
    /// A request failed; `error` is now set.
    Failed,
    Selection,
    Hover,
    /// Local-only editor state (drag preview, notices).
    Preview,
    Notice,
}

/// A state change in one of the application stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub store: StoreKind,
    pub change: ChangeKind,
    /// Entity the change concerns, when there is a single one.
    pub entity_id: Option<String>,
}

impl StoreEvent {
    pub fn new(store: StoreKind, change: ChangeKind) -> Self {
        Self {
            store,
            change,
            entity_id: None,
        }
    }

    /// Attach the entity the change concerns.
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Slow subscribers that fall more than the capacity behind observe
/// `RecvError::Lagged` and should re-render from a fresh snapshot.
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody listens.
    pub fn publish(&self, event: StoreEvent) {
        tracing::trace!(store = ?event.store, change = ?event.change, "Store event");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
