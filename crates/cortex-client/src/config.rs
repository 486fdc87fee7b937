//! Connection configuration for the rules engine
//!
//! Connection parameters live in a TOML file. Environment variables
//! override individual fields so credentials can stay out of checked-in
//! files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("cortex-manager/{}", env!("CARGO_PKG_VERSION"))
}

/// Connection parameters for one rules engine tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the engine, e.g. `http://cortex.example:9009`
    pub address: String,

    /// Tenant to scope requests to; sent as `X-Scope-OrgID` when set
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Basic-auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User agent for outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Config {
    /// Construct a config for the given address with all defaults
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tenant_id: None,
            username: None,
            password: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }

    /// Load a config file and apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(?path, "Loading connection config");
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override fields from `CORTEX_ADDRESS`, `CORTEX_TENANT_ID`,
    /// `CORTEX_USERNAME` and `CORTEX_PASSWORD` when set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var("CORTEX_ADDRESS") {
            self.address = address;
        }
        if let Ok(tenant) = std::env::var("CORTEX_TENANT_ID") {
            self.tenant_id = Some(tenant);
        }
        if let Ok(username) = std::env::var("CORTEX_USERNAME") {
            self.username = Some(username);
        }
        if let Ok(password) = std::env::var("CORTEX_PASSWORD") {
            self.password = Some(password);
        }
    }
}
