use crate::error::{ClientError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TOAST_SECS: u64 = 4;
pub const MODAL_SWITCH_DELAY: Duration = Duration::from_millis(100);

const ENV_API_URL: &str = "INSTADEV_API_URL";
const ENV_DATA_DIR: &str = "INSTADEV_DATA_DIR";
const ENV_REQUEST_TIMEOUT: &str = "INSTADEV_REQUEST_TIMEOUT_SECS";
const ENV_TOAST_SECS: &str = "INSTADEV_TOAST_SECS";

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// `None` when no platform data directory exists; session state is then
    /// kept in memory only.
    pub data_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub notification_ttl: Duration,
    pub modal_switch_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: dirs::data_dir().map(|dir| dir.join("instadev")),
            request_timeout: None,
            notification_ttl: Duration::from_secs(DEFAULT_TOAST_SECS),
            modal_switch_delay: MODAL_SWITCH_DELAY,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup(ENV_API_URL)) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = non_empty(lookup(ENV_DATA_DIR)) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = non_empty(lookup(ENV_REQUEST_TIMEOUT)) {
            config.request_timeout = Some(Duration::from_secs(parse_secs(ENV_REQUEST_TIMEOUT, &raw)?));
        }
        if let Some(raw) = non_empty(lookup(ENV_TOAST_SECS)) {
            config.notification_ttl = Duration::from_secs(parse_secs(ENV_TOAST_SECS, &raw)?);
        }

        Ok(config)
    }

    pub fn session_file(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("session.json"))
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("logs"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ClientError::config(format!(
            "{key} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}
