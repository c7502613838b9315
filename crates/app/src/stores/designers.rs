//! Designers store.

use std::sync::Mutex;

use scenedesk_core::{CreateDesigner, Designer};
use scenedesk_events::{ChangeKind, StoreKind};

use super::{lock, StoreContext};

/// Snapshot of the designers collection and its request state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignersState {
    pub designers: Vec<Designer>,
    pub loading: bool,
    pub error: Option<String>,
    /// Designer chosen in the editor's picker; new objects are attributed
    /// to it.
    pub selected_designer_id: Option<String>,
}

pub struct DesignersStore {
    ctx: StoreContext,
    state: Mutex<DesignersState>,
}

impl DesignersStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(DesignersState::default()),
        }
    }

    pub fn snapshot(&self) -> DesignersState {
        lock(&self.state).clone()
    }

    pub fn designers(&self) -> Vec<Designer> {
        lock(&self.state).designers.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn selected_id(&self) -> Option<String> {
        lock(&self.state).selected_designer_id.clone()
    }

    /// Replace the collection with the API's list.
    ///
    /// Does nothing while another request on this store is in flight.
    pub async fn fetch(&self) {
        {
            let mut state = lock(&self.state);
            if state.loading {
                tracing::debug!("Designers request already in flight; fetch skipped");
                return;
            }
            state.loading = true;
            state.error = None;
        }
        self.emit(ChangeKind::Loading, None);

        let Some(result) = self.ctx.guarded(self.ctx.api.list_designers()).await else {
            tracing::debug!("Designers fetch discarded on shutdown");
            return;
        };

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(designers) => {
                tracing::debug!(count = designers.len(), "Designers loaded");
                state.designers = designers;
                drop(state);
                self.emit(ChangeKind::Loaded, None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch designers");
                state.error = Some(e.to_string());
                drop(state);
                self.emit(ChangeKind::Failed, None);
            }
        }
    }

    /// Create a designer and append it to the collection.
    pub async fn create(&self, input: CreateDesigner) {
        self.begin();

        let Some(result) = self.ctx.guarded(self.ctx.api.create_designer(input)).await else {
            tracing::debug!("Designer creation discarded on shutdown");
            return;
        };

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(created) => {
                let id = created.id.clone();
                state.designers.push(created);
                drop(state);
                self.emit(ChangeKind::Created, Some(&id));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create designer");
                state.error = Some(e.to_string());
                drop(state);
                self.emit(ChangeKind::Failed, None);
            }
        }
    }

    /// Choose the designer new objects are attributed to. `None` clears it.
    pub fn set_selected(&self, id: Option<String>) {
        lock(&self.state).selected_designer_id = id.clone();
        self.emit(ChangeKind::Selection, id.as_deref());
    }

    fn begin(&self) {
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }
        self.emit(ChangeKind::Loading, None);
    }

    fn emit(&self, change: ChangeKind, entity_id: Option<&str>) {
        self.ctx.emit(StoreKind::Designers, change, entity_id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scenedesk_api::{ApiConfig, MockApi};
    use scenedesk_db::{MemoryStore, Persistence};
    use scenedesk_events::EventBus;

    use super::*;

    fn store() -> DesignersStore {
        let api = MockApi::new(
            Persistence::new(Arc::new(MemoryStore::new())),
            ApiConfig::default(),
        );
        DesignersStore::new(StoreContext::new(
            Arc::new(api),
            Arc::new(EventBus::default()),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_loads_seeded_designers() {
        let store = store();
        assert!(store.designers().is_empty());

        store.fetch().await;

        let state = store.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
        let names: Vec<&str> = state.designers.iter().map(|d| d.full_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Cooper", "Bob Smith", "Clara Johnson"]);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_is_set_while_request_is_in_flight() {
        let store = Arc::new(store());
        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.fetch().await }
        });
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        task.await.unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn create_marks_loading_and_blocks_fetch() {
        let store = Arc::new(store());
        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move {
                store
                    .create(CreateDesigner {
                        full_name: "Dana Scully".into(),
                        working_hours: "07:00-15:00".into(),
                    })
                    .await
            }
        });
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        // Shared flag: a fetch during the create is skipped.
        store.fetch().await;
        assert!(store.designers().is_empty());

        task.await.unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.designers().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn create_appends_last() {
        let store = store();
        store.fetch().await;
        store
            .create(CreateDesigner {
                full_name: "Dana Scully".into(),
                working_hours: "07:00-15:00".into(),
            })
            .await;

        let designers = store.designers();
        assert_eq!(designers.len(), 4);
        assert_eq!(designers[0].full_name, "Alice Cooper");
        assert_eq!(designers[3].full_name, "Dana Scully");
        assert!(!store.is_loading());
    }

    #[test]
    fn selection_is_a_plain_setter() {
        let store = store();
        assert!(store.selected_id().is_none());

        store.set_selected(Some("d2".into()));
        assert_eq!(store.selected_id().as_deref(), Some("d2"));

        store.set_selected(None);
        assert!(store.selected_id().is_none());
        assert!(!store.is_loading());
    }
}
