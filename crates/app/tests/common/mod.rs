#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scenedesk_api::{ApiConfig, ApiResult, DashboardApi, MockApi};
use scenedesk_app::{AppConfig, AppState};
use scenedesk_core::{
    CoreError, CreateDesigner, CreateSceneObject, Designer, SceneObject, SceneObjectPatch,
};
use scenedesk_db::{MemoryStore, Persistence};

/// Mock API that records every call it forwards.
pub struct CountingApi {
    inner: MockApi,
    pub list_designers_calls: AtomicUsize,
    pub list_objects_calls: AtomicUsize,
    pub create_designer_calls: AtomicUsize,
    pub create_object_calls: AtomicUsize,
    pub updates: Mutex<Vec<(String, SceneObjectPatch)>>,
    /// When set, list operations fail with an internal error.
    pub fail_lists: AtomicBool,
    /// When set, create operations fail without reaching the backend.
    pub fail_creates: AtomicBool,
    /// When set, updates are recorded but fail without reaching the backend.
    pub fail_updates: AtomicBool,
}

impl CountingApi {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            inner: MockApi::new(persistence, ApiConfig::default()),
            list_designers_calls: AtomicUsize::new(0),
            list_objects_calls: AtomicUsize::new(0),
            create_designer_calls: AtomicUsize::new(0),
            create_object_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
            fail_lists: AtomicBool::new(false),
            fail_creates: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub fn list_designers_count(&self) -> usize {
        self.list_designers_calls.load(Ordering::SeqCst)
    }

    pub fn list_objects_count(&self) -> usize {
        self.list_objects_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> Vec<(String, SceneObjectPatch)> {
        self.updates.lock().unwrap().clone()
    }

    fn injected_failure(flag: &AtomicBool) -> Option<CoreError> {
        flag.load(Ordering::SeqCst)
            .then(|| CoreError::Internal("backend unavailable".into()))
    }
}

#[async_trait]
impl DashboardApi for CountingApi {
    async fn list_designers(&self) -> ApiResult<Vec<Designer>> {
        self.list_designers_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.list_designers().await;
        match Self::injected_failure(&self.fail_lists) {
            Some(err) => Err(err),
            None => result,
        }
    }

    async fn create_designer(&self, input: CreateDesigner) -> ApiResult<Designer> {
        self.create_designer_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::injected_failure(&self.fail_creates) {
            return Err(err);
        }
        self.inner.create_designer(input).await
    }

    async fn list_objects(&self) -> ApiResult<Vec<SceneObject>> {
        self.list_objects_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.list_objects().await;
        match Self::injected_failure(&self.fail_lists) {
            Some(err) => Err(err),
            None => result,
        }
    }

    async fn create_object(&self, input: CreateSceneObject) -> ApiResult<SceneObject> {
        self.create_object_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::injected_failure(&self.fail_creates) {
            return Err(err);
        }
        self.inner.create_object(input).await
    }

    async fn update_object(&self, id: &str, patch: SceneObjectPatch) -> ApiResult<SceneObject> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), patch.clone()));
        if let Some(err) = Self::injected_failure(&self.fail_updates) {
            return Err(err);
        }
        self.inner.update_object(id, patch).await
    }
}

/// Application state over an in-memory medium, with the API instrumented.
pub fn test_app() -> (AppState, Arc<CountingApi>) {
    test_app_with(Persistence::new(Arc::new(MemoryStore::new())))
}

pub fn test_app_with(persistence: Persistence) -> (AppState, Arc<CountingApi>) {
    let api = Arc::new(CountingApi::new(persistence));
    let state = AppState::with_api(AppConfig::default(), api.clone());
    (state, api)
}
