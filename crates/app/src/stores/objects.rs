//! Scene objects store.

use std::sync::Mutex;

use scenedesk_core::{CreateSceneObject, SceneObject, SceneObjectPatch};
use scenedesk_events::{ChangeKind, StoreKind};

use super::{lock, StoreContext};

/// Snapshot of the scene objects collection and its request state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectsState {
    pub objects: Vec<SceneObject>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_object_id: Option<String>,
    pub hovered_object_id: Option<String>,
}

impl ObjectsState {
    pub fn find(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// The selected object, if the selection points at a loaded one.
    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected_object_id
            .as_deref()
            .and_then(|id| self.find(id))
    }
}

pub struct ObjectsStore {
    ctx: StoreContext,
    state: Mutex<ObjectsState>,
}

impl ObjectsStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(ObjectsState::default()),
        }
    }

    pub fn snapshot(&self) -> ObjectsState {
        lock(&self.state).clone()
    }

    pub fn objects(&self) -> Vec<SceneObject> {
        lock(&self.state).objects.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<SceneObject> {
        lock(&self.state).find(id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn selected_id(&self) -> Option<String> {
        lock(&self.state).selected_object_id.clone()
    }

    pub fn hovered_id(&self) -> Option<String> {
        lock(&self.state).hovered_object_id.clone()
    }

    pub fn selected(&self) -> Option<SceneObject> {
        lock(&self.state).selected().cloned()
    }

    /// Replace the collection with the API's list.
    ///
    /// Does nothing while another request on this store is in flight.
    pub async fn fetch(&self) {
        {
            let mut state = lock(&self.state);
            if state.loading {
                tracing::debug!("Objects request already in flight; fetch skipped");
                return;
            }
            state.loading = true;
            state.error = None;
        }
        self.emit(ChangeKind::Loading, None);

        let Some(result) = self.ctx.guarded(self.ctx.api.list_objects()).await else {
            tracing::debug!("Objects fetch discarded on shutdown");
            return;
        };

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(objects) => {
                tracing::debug!(count = objects.len(), "Scene objects loaded");
                state.objects = objects;
                drop(state);
                self.emit(ChangeKind::Loaded, None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch scene objects");
                state.error = Some(e.to_string());
                drop(state);
                self.emit(ChangeKind::Failed, None);
            }
        }
    }

    /// Create an object and append it to the collection.
    pub async fn create(&self, input: CreateSceneObject) {
        self.begin();

        let Some(result) = self.ctx.guarded(self.ctx.api.create_object(input)).await else {
            tracing::debug!("Object creation discarded on shutdown");
            return;
        };

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(created) => {
                let id = created.id.clone();
                state.objects.push(created);
                drop(state);
                self.emit(ChangeKind::Created, Some(&id));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create scene object");
                state.error = Some(e.to_string());
                drop(state);
                self.emit(ChangeKind::Failed, None);
            }
        }
    }

    /// Patch an object and swap the merged record in at the same index.
    ///
    /// A missing id ends with `error` set and the collection untouched.
    pub async fn update(&self, id: &str, patch: SceneObjectPatch) {
        self.begin();

        let Some(result) = self.ctx.guarded(self.ctx.api.update_object(id, patch)).await else {
            tracing::debug!(object_id = %id, "Object update discarded on shutdown");
            return;
        };

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(updated) => {
                if let Some(slot) = state.objects.iter_mut().find(|o| o.id == id) {
                    *slot = updated;
                }
                drop(state);
                self.emit(ChangeKind::Updated, Some(id));
            }
            Err(e) => {
                tracing::warn!(object_id = %id, error = %e, "Failed to update scene object");
                state.error = Some(e.to_string());
                drop(state);
                self.emit(ChangeKind::Failed, Some(id));
            }
        }
    }

    pub fn set_selected(&self, id: Option<String>) {
        lock(&self.state).selected_object_id = id.clone();
        self.emit(ChangeKind::Selection, id.as_deref());
    }

    pub fn set_hovered(&self, id: Option<String>) {
        lock(&self.state).hovered_object_id = id.clone();
        self.emit(ChangeKind::Hover, id.as_deref());
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
        self.ctx.emit(StoreKind::Objects, change, entity_id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use scenedesk_api::{ApiConfig, MockApi};
    use scenedesk_core::{ObjectSize, Vector3};
    use scenedesk_db::{MemoryStore, Persistence};
    use scenedesk_events::EventBus;

    use super::*;

    fn store() -> ObjectsStore {
        let api = MockApi::new(
            Persistence::new(Arc::new(MemoryStore::new())),
            ApiConfig::default(),
        );
        ObjectsStore::new(StoreContext::new(
            Arc::new(api),
            Arc::new(EventBus::default()),
        ))
    }

    fn new_object(name: &str) -> CreateSceneObject {
        CreateSceneObject {
            name: name.into(),
            designer_id: "d1".into(),
            color: "#22c55e".into(),
            position: Vector3::new(0.0, 0.0, 0.0),
            size: ObjectSize::Normal,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_on_empty_storage_yields_no_objects() {
        let store = store();
        store.fetch().await;
        assert!(store.is_empty());
        assert!(store.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn update_replaces_in_place() {
        let store = store();
        store.create(new_object("a")).await;
        store.create(new_object("b")).await;
        store.create(new_object("c")).await;
        let middle = store.objects()[1].id.clone();

        store
            .update(&middle, SceneObjectPatch::position(Vector3::new(3.0, 0.0, 5.0)))
            .await;

        let objects = store.objects();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(objects[1].position, Vector3::new(3.0, 0.0, 5.0));
        assert_eq!(objects[0].position, Vector3::default());
    }

    #[tokio::test(start_paused = true)]
    async fn update_missing_sets_error_and_keeps_items() {
        let store = store();
        store.create(new_object("a")).await;
        let before = store.objects();

        store.update("missing", SceneObjectPatch::name("x")).await;

        assert_eq!(store.objects(), before);
        assert_eq!(store.error().as_deref(), Some("Object not found"));
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn next_action_clears_error() {
        let store = store();
        store.update("missing", SceneObjectPatch::name("x")).await;
        assert!(store.error().is_some());

        store.fetch().await;
        assert!(store.error().is_none());
    }

    #[test]
    fn hover_and_selection_are_independent() {
        let store = store();
        store.set_hovered(Some("obj_a".into()));
        store.set_selected(Some("obj_b".into()));

        assert_eq!(store.hovered_id().as_deref(), Some("obj_a"));
        assert_eq!(store.selected_id().as_deref(), Some("obj_b"));

        store.set_hovered(None);
        assert!(store.hovered_id().is_none());
        assert_eq!(store.selected_id().as_deref(), Some("obj_b"));
    }
}
