//! The API surface stores call, and its mock implementation.

use async_trait::async_trait;
use scenedesk_core::ids::{generate_id, DESIGNER_PREFIX, OBJECT_PREFIX};
use scenedesk_core::{
    CoreError, CreateDesigner, CreateSceneObject, Designer, SceneObject, SceneObjectPatch,
    Vector3,
};
use scenedesk_db::Persistence;

use crate::config::ApiConfig;

/// Result type returned by every API operation.
pub type ApiResult<T> = Result<T, CoreError>;

/// Backend operations available to the entity stores.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_designers(&self) -> ApiResult<Vec<Designer>>;

    async fn create_designer(&self, input: CreateDesigner) -> ApiResult<Designer>;

    async fn list_objects(&self) -> ApiResult<Vec<SceneObject>>;

    async fn create_object(&self, input: CreateSceneObject) -> ApiResult<SceneObject>;

    /// Shallow-merge `patch` into the stored object.
    ///
    /// Fails with [`CoreError::NotFound`] when `id` is not stored.
    async fn update_object(&self, id: &str, patch: SceneObjectPatch) -> ApiResult<SceneObject>;
}

/// Latency-emulating backend over the persistence adapter.
#[derive(Debug, Clone)]
pub struct MockApi {
    persistence: Persistence,
    config: ApiConfig,
}

impl MockApi {
    pub fn new(persistence: Persistence, config: ApiConfig) -> Self {
        Self {
            persistence,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn round_trip(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}

/// Reject positions that cannot be encoded. A single NaN would make the
/// whole stored collection undecodable.
fn ensure_finite(position: &Vector3) -> ApiResult<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Position coordinates must be finite numbers".into(),
        ))
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn list_designers(&self) -> ApiResult<Vec<Designer>> {
        self.round_trip().await;
        let designers = self.persistence.load_designers();
        tracing::debug!(count = designers.len(), "Listed designers");
        Ok(designers)
    }

    async fn create_designer(&self, input: CreateDesigner) -> ApiResult<Designer> {
        self.round_trip().await;
        let designer = self
            .persistence
            .create_designer(input, generate_id(DESIGNER_PREFIX));
        tracing::info!(designer_id = %designer.id, "Designer created");
        Ok(designer)
    }

    async fn list_objects(&self) -> ApiResult<Vec<SceneObject>> {
        self.round_trip().await;
        let objects = self.persistence.load_objects();
        tracing::debug!(count = objects.len(), "Listed scene objects");
        Ok(objects)
    }

    async fn create_object(&self, input: CreateSceneObject) -> ApiResult<SceneObject> {
        self.round_trip().await;
        ensure_finite(&input.position)?;
        let object = self
            .persistence
            .create_object(input, generate_id(OBJECT_PREFIX));
        tracing::info!(
            object_id = %object.id,
            designer_id = %object.designer_id,
            "Scene object created",
        );
        Ok(object)
    }

    async fn update_object(&self, id: &str, patch: SceneObjectPatch) -> ApiResult<SceneObject> {
        self.round_trip().await;
        if let Some(position) = &patch.position {
            ensure_finite(position)?;
        }
        match self.persistence.update_object(id, &patch) {
            Some(updated) => {
                tracing::debug!(object_id = %id, "Scene object updated");
                Ok(updated)
            }
            None => {
                tracing::warn!(object_id = %id, "Update target not found");
                Err(CoreError::object_not_found(id))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
