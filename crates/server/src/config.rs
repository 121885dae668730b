use anyhow::{Context, Result};
use fnapps_core::{ConfigProvider, COMPARTMENT_ID_KEY};
use fnapps_remote::{ClientConfig, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `fnapps` server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Tenancy scoping
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Functions service client configuration
    #[serde(default)]
    pub functions: FunctionsConfig,
}

/// Server transport and binding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Transport mode: "stdio" or "http"
    #[serde(default = "default_transport")]
    pub transport: String,

    /// HTTP bind address (only used when transport = "http")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port (only used when transport = "http")
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Compartment OCID applications are created in and listed from
    #[serde(default, rename = "compartment-id")]
    pub compartment_id: String,
}

/// Functions management API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionsConfig {
    /// Base URL of the functions service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_transport() -> String {
    "stdio".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("fnapps/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FunctionsConfig {
    /// Settings for the HTTP functions client
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl ConfigProvider for Config {
    fn get_string(&self, key: &str) -> String {
        if key == COMPARTMENT_ID_KEY {
            self.oracle.compartment_id.clone()
        } else {
            String::new()
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from default locations in order:
    /// 1. ./fnapps.toml (current directory)
    /// 2. /etc/fnapps/config.toml (system-wide)
    /// 3. Built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = vec![
            PathBuf::from("./fnapps.toml"),
            PathBuf::from("/etc/fnapps/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        tracing::info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Generate example configuration file
    #[must_use]
    pub fn example() -> String {
        let example = Config::default();
        toml::to_string_pretty(&example).expect("Failed to serialize example config")
    }
}
