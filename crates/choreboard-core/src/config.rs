use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_SILENCE_WINDOW_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Remote endpoint URL. None runs the board offline.
    pub endpoint: Option<String>,
    pub poll_interval_secs: u64,
    /// Must exceed the poll interval so a pending write can land remotely
    /// before the next pull treats the remote as ground truth.
    pub silence_window_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            silence_window_secs: DEFAULT_SILENCE_WINDOW_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn silence_window(&self) -> Duration {
        Duration::from_secs(self.silence_window_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
