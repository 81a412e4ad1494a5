use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{ScheduleError, ScheduleResult};

/// Service configuration: schedule source, refresh cadence, state server.
///
/// Loaded from a YAML file when one is present, then overridden from the
/// environment. Passed by value; the published state is the only shared
/// object in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schedule source (overview page and fetch bounds)
    #[serde(default)]
    pub source: SourceConfig,

    /// Refresh cadence
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// State/metrics HTTP server
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Overview page that links the current schedule PDF
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the link-discovery fetch in seconds (default: 15s)
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,

    /// Timeout for the document fetch in seconds (default: 30s)
    #[serde(default = "default_document_timeout")]
    pub document_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles (default: 6 hours)
    #[serde(default = "default_refresh_interval")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the state/metrics server (default: 8094)
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_base_url() -> String {
    "https://www.kinder-spiel-sport.de".to_string()
}
fn default_discovery_timeout() -> u64 {
    15
}
fn default_document_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    6 * 60 * 60
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8094
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            base_url: default_base_url(),
            discovery_timeout_secs: default_discovery_timeout(),
            document_timeout_secs: default_document_timeout(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            interval_secs: default_refresh_interval(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            refresh: RefreshConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or environment
    pub fn load() -> ScheduleResult<Self> {
        if let Ok(config_path) = env::var("SCHWIMMPLAN_CONFIG_PATH") {
            Self::from_file(&config_path)
        } else if Path::new("config/schwimmplan.yaml").exists() {
            Self::from_file("config/schwimmplan.yaml")
        } else {
            Ok(Self::from_env(Self::default()))
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to parse config: {}", e))
        })?;

        Ok(Self::from_env(config))
    }

    /// Override configuration with environment variables
    pub fn from_env(mut config: Config) -> Self {
        if let Ok(v) = env::var("SCHWIMMPLAN_BASE_URL") {
            if !v.is_empty() {
                config.source.base_url = v;
            }
        }
        if let Ok(v) = env::var("SCHWIMMPLAN_DISCOVERY_TIMEOUT_SECONDS") {
            if let Ok(secs) = v.parse::<u64>() {
                config.source.discovery_timeout_secs = secs;
            }
        }
        if let Ok(v) = env::var("SCHWIMMPLAN_DOCUMENT_TIMEOUT_SECONDS") {
            if let Ok(secs) = v.parse::<u64>() {
                config.source.document_timeout_secs = secs;
            }
        }
        if let Ok(v) = env::var("SCHWIMMPLAN_REFRESH_INTERVAL_SECONDS") {
            if let Ok(secs) = v.parse::<u64>() {
                config.refresh.interval_secs = secs;
            }
        }
        if let Ok(v) = env::var("SCHWIMMPLAN_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                config.server.port = port;
            }
        }

        config
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.source.discovery_timeout_secs)
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.source.document_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }
}
