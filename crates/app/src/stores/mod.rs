//! Entity stores: in-memory collections mirrored from the API layer.
//!
//! Each store keeps its state behind a `std::sync::Mutex` that is only held
//! between suspension points, never across an `.await`. Actions catch every
//! API failure and record its message in `error`; nothing propagates to the
//! caller.

pub mod designers;
pub mod objects;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scenedesk_api::DashboardApi;
use scenedesk_events::{ChangeKind, EventBus, StoreEvent, StoreKind};
use tokio_util::sync::CancellationToken;

pub use designers::{DesignersState, DesignersStore};
pub use objects::{ObjectsState, ObjectsStore};

/// Dependencies shared by every store.
#[derive(Clone)]
pub struct StoreContext {
    pub api: Arc<dyn DashboardApi>,
    pub event_bus: Arc<EventBus>,
    /// Cancelled when the application shuts down; in-flight requests then
    /// resolve as discarded.
    pub cancel: CancellationToken,
}

impl StoreContext {
    pub fn new(api: Arc<dyn DashboardApi>, event_bus: Arc<EventBus>) -> Self {
        Self {
            api,
            event_bus,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Await `request` unless shutdown happens first. `None` means the
    /// result was discarded.
    pub(crate) async fn guarded<T>(&self, request: impl Future<Output = T>) -> Option<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            out = request => Some(out),
        }
    }

    pub(crate) fn emit(&self, store: StoreKind, change: ChangeKind, entity_id: Option<&str>) {
        let event = StoreEvent::new(store, change);
        let event = match entity_id {
            Some(id) => event.with_entity(id),
            None => event,
        };
        self.event_bus.publish(event);
    }
}

/// Fetch whichever of the two collections is still empty, concurrently.
pub async fn load_if_empty(designers: &DesignersStore, objects: &ObjectsStore) {
    let load_designers = async {
        if designers.designers().is_empty() {
            designers.fetch().await;
        }
    };
    let load_objects = async {
        if objects.is_empty() {
            objects.fetch().await;
        }
    };
    tokio::join!(load_designers, load_objects);
}

/// Lock a store mutex, recovering the data if a panicking thread poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
