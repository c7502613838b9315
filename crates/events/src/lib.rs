//! Change notifications for the scenedesk stores.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StoreEvent`]: what changed, in which store, about which entity.
//!
//! A presentation layer subscribes once and re-renders from a fresh store
//! snapshot whenever an event arrives.

pub mod bus;

pub use bus::{ChangeKind, EventBus, StoreEvent, StoreKind};
