use std::path::PathBuf;
use std::time::Duration;

use scenedesk_api::{ApiConfig, DEFAULT_LATENCY};

use crate::editor::DEFAULT_NOTICE_DURATION;

/// Where collections are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// JSON files inside a directory; survives restarts.
    File(PathBuf),
    /// Process memory; lost on exit.
    Memory,
    /// No medium at all. Loads fall back to defaults and writes are dropped.
    Disabled,
}

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageMode,
    pub api: ApiConfig,
    /// How long canvas notices stay visible (default: 3.2 s).
    pub notice_duration: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `SCENEDESK_DATA_DIR`   | unset (in-memory storage)        |
    /// | `SCENEDESK_STORAGE`    | `file` if a data dir is set, else `memory`; `off` disables |
    /// | `SCENEDESK_LATENCY_MS` | `200`                            |
    /// | `SCENEDESK_NOTICE_MS`  | `3200`                           |
    pub fn from_env() -> Self {
        let data_dir = std::env::var("SCENEDESK_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let storage = match std::env::var("SCENEDESK_STORAGE").ok().as_deref() {
            Some("off") | Some("none") => StorageMode::Disabled,
            Some("memory") => StorageMode::Memory,
            Some("file") | None => match data_dir {
                Some(dir) => StorageMode::File(dir),
                None => StorageMode::Memory,
            },
            Some(other) => {
                tracing::warn!(value = other, "Unknown SCENEDESK_STORAGE; using memory");
                StorageMode::Memory
            }
        };

        let latency = duration_ms_var("SCENEDESK_LATENCY_MS", DEFAULT_LATENCY);
        let notice_duration = duration_ms_var("SCENEDESK_NOTICE_MS", DEFAULT_NOTICE_DURATION);

        Self {
            storage,
            api: ApiConfig::with_latency(latency),
            notice_duration,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageMode::Memory,
            api: ApiConfig::default(),
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

fn duration_ms_var(name: &str, default: Duration) -> Duration {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!(var = name, value = %raw, "Not a number of milliseconds; using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.api.latency, Duration::from_millis(200));
        assert_eq!(config.notice_duration, Duration::from_millis(3200));
    }

    #[test]
    fn missing_variable_uses_default() {
        let d = duration_ms_var("SCENEDESK_TEST_UNSET_VARIABLE", Duration::from_millis(7));
        assert_eq!(d, Duration::from_millis(7));
    }
}
