//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as API timeouts and submission ordering.

use std::time::Duration;

/// Application behavior configuration.
///
/// Controls runtime behavior of the chat session and inference client.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Maximum time to wait for an inference response. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Hold a per-session lock across each inference call so responses are
    /// delivered in submission order.
    pub serialize_submissions: bool,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn serialized(mut self, serialize: bool) -> Self {
        self.serialize_submissions = serialize;
        self
    }
}
