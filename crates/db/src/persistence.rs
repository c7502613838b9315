//! Typed collection access over an optional key-value medium.

use std::sync::Arc;

use scenedesk_core::{
    CreateDesigner, CreateSceneObject, Designer, SceneObject, SceneObjectPatch,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::medium::KeyValueStore;
use crate::seed::default_designers;

/// Key holding the JSON array of designers.
pub const DESIGNERS_KEY: &str = "simple-dashboard-3d:designers";

/// Key holding the JSON array of scene objects.
pub const OBJECTS_KEY: &str = "simple-dashboard-3d:objects";

/// Persistence adapter shared by the mock API.
///
/// Cheap to clone. Without a medium (headless context) loads fall back to
/// defaults and saves are silent no-ops.
#[derive(Clone)]
pub struct Persistence {
    medium: Option<Arc<dyn KeyValueStore>>,
}

impl Persistence {
    pub fn new(medium: Arc<dyn KeyValueStore>) -> Self {
        Self {
            medium: Some(medium),
        }
    }

    /// Adapter with no medium behind it.
    pub fn detached() -> Self {
        Self { medium: None }
    }

    pub fn is_attached(&self) -> bool {
        self.medium.is_some()
    }

    /// Decoded collection under `key`, or `None` if absent or corrupt.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let raw = self.medium.as_ref()?.get(key)?;
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable stored collection");
                None
            }
        }
    }

    /// Encode and write `items` under `key`. Failures are logged, not
    /// returned.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) {
        let Some(medium) = &self.medium else {
            tracing::trace!(key, "No storage medium; skipping save");
            return;
        };
        let encoded = match serde_json::to_string(items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to encode collection");
                return;
            }
        };
        if let Err(e) = medium.set(key, &encoded) {
            tracing::warn!(key, error = %e, "Storage write failed; continuing in memory only");
        }
    }

    // -----------------------------------------------------------------------
    // Designers
    // -----------------------------------------------------------------------

    /// Stored designers, seeding the defaults when none are stored.
    pub fn load_designers(&self) -> Vec<Designer> {
        if self.medium.is_none() {
            return default_designers();
        }
        match self.load::<Designer>(DESIGNERS_KEY) {
            Some(designers) if !designers.is_empty() => designers,
            _ => {
                let seeded = default_designers();
                self.save(DESIGNERS_KEY, &seeded);
                tracing::info!(count = seeded.len(), "Seeded default designers");
                seeded
            }
        }
    }

    /// Append a designer with the given id and persist the collection.
    pub fn create_designer(&self, input: CreateDesigner, id: String) -> Designer {
        let mut designers = self.load_designers();
        let designer = input.into_designer(id);
        designers.push(designer.clone());
        self.save(DESIGNERS_KEY, &designers);
        designer
    }

    // -----------------------------------------------------------------------
    // Scene objects
    // -----------------------------------------------------------------------

    /// Stored scene objects; empty when nothing is stored.
    pub fn load_objects(&self) -> Vec<SceneObject> {
        self.load::<SceneObject>(OBJECTS_KEY).unwrap_or_default()
    }

    /// Append a scene object with the given id and persist the collection.
    pub fn create_object(&self, input: CreateSceneObject, id: String) -> SceneObject {
        let mut objects = self.load_objects();
        let object = input.into_object(id);
        objects.push(object.clone());
        self.save(OBJECTS_KEY, &objects);
        object
    }

    /// Merge `patch` into the object with `id` in place.
    ///
    /// Returns `None` if no object with that id is stored.
    pub fn update_object(&self, id: &str, patch: &SceneObjectPatch) -> Option<SceneObject> {
        let mut objects = self.load_objects();
        let existing = objects.iter_mut().find(|o| o.id == id)?;
        existing.apply(patch);
        let updated = existing.clone();
        self.save(OBJECTS_KEY, &objects);
        Some(updated)
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("attached", &self.is_attached())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
