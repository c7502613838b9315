//! Mock API layer.
//!
//! Emulates a remote backend in front of the persistence adapter: every
//! call suspends for a fixed latency, identifiers are synthesized here, and
//! a missing update target is reported as [`CoreError::NotFound`].
//!
//! Stores talk to the layer through the [`DashboardApi`] trait so tests can
//! substitute an instrumented double.

pub mod client;
pub mod config;

pub use client::{ApiResult, DashboardApi, MockApi};
pub use config::{ApiConfig, DEFAULT_LATENCY};

pub use scenedesk_core::CoreError;
