//! Domain model shared by every scenedesk crate.
//!
//! Holds the designer and scene-object records, their creation inputs and
//! patches, the error taxonomy, identifier generation and the designer form
//! validator. No I/O happens here.

pub mod error;
pub mod ids;
pub mod model;
pub mod validation;

pub use error::CoreError;
pub use model::{
    CreateDesigner, CreateSceneObject, Designer, ObjectSize, SceneObject, SceneObjectPatch,
    Vector3,
};
