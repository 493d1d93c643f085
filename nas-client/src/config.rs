// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NasError, Result};

/// Which firmware family's endpoint layout the appliance speaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiGeneration {
    /// One monolithic `sysinfo.xml` plus `home_mgr` for disks and volumes
    Legacy,
    /// Separate status, device, firmware and per-disk SMART endpoints
    #[default]
    PerEndpoint,
}

/// Connection settings, usually loaded from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    pub username: String,
    /// May be left out of the file and supplied by the caller
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_https_port")]
    pub https_port: u16,
    /// Appliances ship self-signed certificates
    #[serde(default)]
    pub verify_tls: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub generation: ApiGeneration,
}

fn default_http_port() -> u16 {
    80
}

fn default_https_port() -> u16 {
    8543
}

fn default_timeout_secs() -> u64 {
    10
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: None,
            http_port: default_http_port(),
            https_port: default_https_port(),
            verify_tls: false,
            timeout_secs: default_timeout_secs(),
            generation: ApiGeneration::default(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(raw).map_err(|error| NasError::Config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| NasError::Config(format!("{}: {error}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        let host_ok = !self.host.is_empty()
            && self
                .host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !host_ok {
            return Err(NasError::Config(format!("invalid host format: {:?}", self.host)));
        }

        if self.username.is_empty() {
            return Err(NasError::Config("username must not be empty".to_string()));
        }

        if self.timeout_secs == 0 {
            return Err(NasError::Config("timeout_secs must be positive".to_string()));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL of the CGI and XML endpoints
    pub fn http_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.http_port)
    }

    /// Base URL of the authentication endpoint
    pub fn https_base_url(&self) -> String {
        format!("https://{}:{}", self.host, self.https_port)
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let password = self
            .password
            .clone()
            .ok_or_else(|| NasError::Config("no password configured".to_string()))?;
        Ok(Credentials::new(self.username.clone(), password))
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
