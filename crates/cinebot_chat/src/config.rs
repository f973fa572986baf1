//! Startup configuration: an optional strict JSON file overridden by environment variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::runtime::DEFAULT_TURN_TIMEOUT;
use crate::session::DEFAULT_WELCOME;

pub const CONFIG_PATH_ENV_VAR: &str = "CINEBOT_CONFIG_PATH";
pub const PROVIDER_ENV_VAR: &str = "CINEBOT_PROVIDER";
pub const ENDPOINT_ENV_VAR: &str = "CINEBOT_ENDPOINT";
pub const TIMEOUT_ENV_VAR: &str = "CINEBOT_TIMEOUT_SEC";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/agent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Http,
    Mock,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Http, ServiceKind::Mock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => agent_service_http::HTTP_SERVICE_ID,
            Self::Mock => agent_service_mock::MOCK_SERVICE_ID,
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| ConfigError::UnknownProvider(value.trim().to_string()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timeout '{0}': expected a whole number of seconds greater than 0")]
    InvalidTimeout(String),

    #[error("unsupported provider '{0}'. Available providers: http, mock")]
    UnknownProvider(String),

    #[error("endpoint must not be empty")]
    EmptyEndpoint,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    timeout_sec: Option<u64>,
    welcome: Option<String>,
    provider: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub service: ServiceKind,
    pub endpoint: String,
    pub turn_timeout: Duration,
    pub welcome: String,
    /// Extra HTTP headers sent with every agent request.
    pub headers: BTreeMap<String, String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            service: ServiceKind::Http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            turn_timeout: DEFAULT_TURN_TIMEOUT,
            welcome: DEFAULT_WELCOME.to_string(),
            headers: BTreeMap::new(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from `lookup` (an environment accessor). Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let file = match lookup(CONFIG_PATH_ENV_VAR) {
            Some(path) => load_file(Path::new(path.trim()))?,
            None => FileConfig::default(),
        };

        let mut config = Self::default();

        if let Some(provider) = lookup(PROVIDER_ENV_VAR).or(file.provider) {
            config.service = ServiceKind::parse(&provider)?;
        }

        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).or(file.endpoint) {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                return Err(ConfigError::EmptyEndpoint);
            }
            config.endpoint = endpoint.to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV_VAR) {
            config.turn_timeout = parse_timeout(&raw)?;
        } else if let Some(seconds) = file.timeout_sec {
            config.turn_timeout = timeout_from_secs(seconds)
                .ok_or_else(|| ConfigError::InvalidTimeout(seconds.to_string()))?;
        }

        if let Some(welcome) = file.welcome.filter(|value| !value.trim().is_empty()) {
            config.welcome = welcome;
        }
        config.headers = file.headers;

        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(timeout_from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.trim().to_string()))
}

fn timeout_from_secs(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}
