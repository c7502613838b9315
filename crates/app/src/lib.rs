//! Application core of the scenedesk dashboard.
//!
//! - [`stores`]: designers and scene-objects stores with their
//!   request/response state machines.
//! - [`editor`]: gesture handling for the 3D canvas and the properties
//!   panel.
//! - [`views`]: table rows, select options and form submission.
//! - [`state::AppState`]: owns everything above for the lifetime of the
//!   application.

pub mod config;
pub mod editor;
pub mod state;
pub mod stores;
pub mod views;

pub use config::{AppConfig, StorageMode};
pub use editor::{EditorSession, Gesture, GestureOutcome, InteractionState, RenderedObject};
pub use state::AppState;
