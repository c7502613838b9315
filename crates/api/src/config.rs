use std::time::Duration;

/// Simulated network round-trip applied before every API operation.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(200);

/// Mock API configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    /// Delay before each operation touches persistence (default: 200 ms).
    pub latency: Duration,
}

impl ApiConfig {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }
}
