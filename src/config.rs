use crate::utils::get_config_dir;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// API endpoint used when neither config, env nor flag provide one.
///
/// Packagers can bake in a different default with `FWCTL_DEFAULT_API_URL`
/// at build time.
pub const DEFAULT_API_URL: &str = match option_env!("FWCTL_DEFAULT_API_URL") {
    Some(url) => url,
    None => "https://api.absam.io/v1",
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Connection settings for the control-plane API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token; requests are sent unauthenticated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Request timeout in seconds (default: 30s, clamped to 1-300s)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    /// Applies command-line/environment values on top of the file values.
    ///
    /// clap has already resolved flag-over-env precedence, so any `Some`
    /// here wins over the config file.
    pub fn with_overrides(mut self, api_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = api_token.filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, MAX_TIMEOUT_SECS))
    }
}

/// Loads the config from `config.json` in the user config directory, or
/// returns defaults if it is missing or unreadable.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O.
pub async fn load_config() -> AppConfig {
    match get_config_dir() {
        Some(dir) => load_config_from(&dir.join("config.json")).await,
        None => AppConfig::default(),
    }
}

/// Loads the config from an explicit path, falling back to defaults.
pub async fn load_config_from(path: &Path) -> AppConfig {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => match serde_json::from_str::<AppConfig>(&json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {e}", path.display());
                AppConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            tracing::warn!("Cannot read config {}: {e}", path.display());
            AppConfig::default()
        }
    }
}
