//! Configuration module
//!
//! Handles loading and managing harness configuration.

#![allow(dead_code)]

pub mod env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use env::EnvConfig;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./api-harness.yaml",
    "./api-harness.yml",
    "./.api-harness.yaml",
    "./.api-harness/config.yaml",
];

fn default_base_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_id_candidates() -> Vec<String> {
    vec!["id".to_string(), "ID".to_string(), "@id".to_string()]
}

fn default_max_concurrent() -> usize {
    4
}

/// Harness configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Root URL of the target service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix for versioned endpoints
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Unauthenticated liveness path, outside the API prefix
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Login identity for session acquisition
    #[serde(default)]
    pub login: LoginConfig,

    /// Field names probed, in order, for a created record's identifier
    #[serde(default = "default_id_candidates")]
    pub id_field_candidates: Vec<String>,

    /// Execute independent suites concurrently
    #[serde(default)]
    pub parallel: bool,

    /// Maximum concurrent suites when parallel
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            health_path: default_health_path(),
            timeout_secs: default_timeout(),
            login: LoginConfig::default(),
            id_field_candidates: default_id_candidates(),
            parallel: false,
            max_concurrent: default_max_concurrent(),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base for versioned endpoints, e.g. `http://localhost:9090/api/v1`
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.api_prefix)
    }

    /// Full liveness URL, bypassing the API prefix
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.health_path)
    }

    /// Full login URL
    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_base(), self.login.login_path)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Find a configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        for location in CONFIG_LOCATIONS {
            let path = PathBuf::from(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from the default location, or defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        if self.id_field_candidates.is_empty() {
            anyhow::bail!("id_field_candidates must not be empty");
        }
        if self.max_concurrent == 0 {
            anyhow::bail!("max_concurrent must be at least 1");
        }
        Ok(())
    }

    /// Generate an example configuration
    pub fn example() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            login: LoginConfig {
                username: "admin".to_string(),
                password: "admin123".to_string(),
                device_id: Some("test-device-001".to_string()),
                ..LoginConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Login identity sent to the authentication endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,

    /// Tenant identifier
    #[serde(default = "default_company_id")]
    pub company_id: i64,

    #[serde(default = "default_client_type")]
    pub client_type: String,

    /// Device identifier; generated per run when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Authentication path under the API prefix
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_company_id() -> i64 {
    1
}

fn default_client_type() -> String {
    "web".to_string()
}

fn default_device_name() -> String {
    "API Test Client".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            company_id: default_company_id(),
            client_type: default_client_type(),
            device_id: None,
            device_name: default_device_name(),
            login_path: default_login_path(),
        }
    }
}

impl LoginConfig {
    /// Configured device id, or a generated one
    pub fn device_id_or_generated(&self) -> String {
        self.device_id
            .clone()
            .unwrap_or_else(|| format!("device-{:08x}", rand::random::<u32>()))
    }

    /// Request body for the authentication endpoint
    pub fn to_request_body(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
            "companyId": self.company_id,
            "clientType": self.client_type,
            "deviceId": self.device_id_or_generated(),
            "deviceName": self.device_name,
        })
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
