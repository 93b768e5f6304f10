//! Client settings for the console monitor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use triagedesk_core::STATUS_POLL_SECS;

/// Settings for the monitor: where the backend lives and how often to poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the triage backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds between status polls.
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

const fn default_poll_secs() -> u64 {
    STATUS_POLL_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_secs: default_poll_secs(),
        }
    }
}

impl ClientSettings {
    /// Path of the settings file under the platform config directory.
    fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("triagedesk")
            .join("settings.json")
    }

    /// Loads settings from file, then applies environment overrides
    /// (`TRIAGEDESK_URL`, `TRIAGEDESK_POLL_SECS`). Missing file means
    /// defaults.
    pub async fn load() -> Self {
        let mut settings = match tokio::fs::read_to_string(Self::path()).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed settings file: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(url) = std::env::var("TRIAGEDESK_URL") {
            settings.base_url = url;
        }
        if let Some(secs) = std::env::var("TRIAGEDESK_POLL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            settings.poll_secs = secs;
        }

        settings
    }
}
