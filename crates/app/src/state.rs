use std::sync::Arc;

use scenedesk_api::{DashboardApi, MockApi};
use scenedesk_db::{FileStore, MemoryStore, Persistence};
use scenedesk_events::EventBus;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, StorageMode};
use crate::editor::EditorSession;
use crate::stores::{load_if_empty, DesignersStore, ObjectsStore, StoreContext};
use crate::views::{designer_rows, DesignerRow};

/// Application state, built once at startup and handed to every view.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Change notifications for re-rendering.
    pub event_bus: Arc<EventBus>,
    pub designers: Arc<DesignersStore>,
    pub objects: Arc<ObjectsStore>,
    cancel: CancellationToken,
}

impl AppState {
    /// Build the state over the mock API and the configured storage.
    pub fn new(config: AppConfig) -> Self {
        let persistence = match &config.storage {
            StorageMode::File(dir) => {
                tracing::info!(dir = %dir.display(), "Using file storage");
                Persistence::new(Arc::new(FileStore::new(dir.clone())))
            }
            StorageMode::Memory => Persistence::new(Arc::new(MemoryStore::new())),
            StorageMode::Disabled => {
                tracing::info!("Storage disabled; changes last for this session only");
                Persistence::detached()
            }
        };
        let api = MockApi::new(persistence, config.api);
        Self::with_api(config, Arc::new(api))
    }

    /// Build the state over any API implementation.
    pub fn with_api(config: AppConfig, api: Arc<dyn DashboardApi>) -> Self {
        let event_bus = Arc::new(EventBus::default());
        let cancel = CancellationToken::new();
        let ctx = StoreContext::new(api, Arc::clone(&event_bus)).with_cancel(cancel.child_token());

        Self {
            config: Arc::new(config),
            designers: Arc::new(DesignersStore::new(ctx.clone())),
            objects: Arc::new(ObjectsStore::new(ctx)),
            event_bus,
            cancel,
        }
    }

    /// A fresh editor session over the shared stores.
    pub fn editor(&self) -> EditorSession {
        EditorSession::new(
            Arc::clone(&self.designers),
            Arc::clone(&self.objects),
            Arc::clone(&self.event_bus),
            self.config.notice_duration,
            self.cancel.child_token(),
        )
    }

    /// Rows for the designers table, from the current store contents.
    pub fn designer_rows(&self) -> Vec<DesignerRow> {
        designer_rows(&self.designers.designers(), &self.objects.objects())
    }

    /// Fetch both collections if they have not been loaded yet.
    pub async fn load(&self) {
        load_if_empty(&self.designers, &self.objects).await;
    }

    /// Stop the application. Requests still in flight are discarded.
    pub fn shutdown(&self) {
        tracing::info!("Shutting down application state");
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
