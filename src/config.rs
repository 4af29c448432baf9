//! Logger configuration and environment resolution.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

pub(crate) const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
pub(crate) const ENV_APP_ENV: &str = "APP_ENV";
pub(crate) const ENV_APP_VERSION: &str = "APP_VERSION";

/// How the process-wide logger gets its configuration.
///
/// The two policies share one construction path; only validation differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPolicy {
    /// Caller must supply `service_name` and `log_file_path`.
    ExplicitRequired,
    /// Everything may be derived from the environment.
    LazyWithDefaults,
}

/// Logger configuration.
///
/// Empty string fields are resolved from the environment, then from hard
/// defaults, at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Logical identity of the emitting process.
    #[serde(default)]
    pub service_name: String,
    /// Destination file; empty derives `/app/logs/{service_name}.log`.
    #[serde(default)]
    pub log_file_path: String,
    /// Deployment tier; empty derives `APP_ENV`, then `"dev"`.
    #[serde(default)]
    pub environment: String,
    /// Build identifier; empty derives `APP_VERSION`, then `"1.0.0"`.
    #[serde(default)]
    pub version: String,
    /// Also emit records to standard output.
    #[serde(default = "default_console_enabled")]
    pub console_enabled: bool,
}

fn default_console_enabled() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            log_file_path: String::new(),
            environment: String::new(),
            version: String::new(),
            console_enabled: default_console_enabled(),
        }
    }
}

impl LoggerConfig {
    /// Configuration used by lazy first-use initialization.
    ///
    /// Console output is off by default on this path; services running under
    /// lazy defaults are assumed to ship logs from the file.
    pub fn from_env() -> Self {
        Self {
            console_enabled: false,
            ..Self::default()
        }
    }

    /// Check required fields under `policy`.
    ///
    /// Runs before any filesystem access so a rejected config leaves no
    /// directories or files behind.
    pub(crate) fn validate(&self, policy: InitPolicy) -> Result<()> {
        if policy == InitPolicy::ExplicitRequired {
            if self.service_name.is_empty() {
                return Err(ConfigError::MissingServiceName);
            }
            if self.log_file_path.is_empty() {
                return Err(ConfigError::MissingLogFile);
            }
        }
        Ok(())
    }

    /// Fill empty fields from the environment, then hard defaults.
    pub(crate) fn resolved(mut self) -> Self {
        if self.service_name.is_empty() {
            self.service_name = env_or(ENV_SERVICE_NAME, "app");
        }
        if self.log_file_path.is_empty() {
            self.log_file_path = format!("/app/logs/{}.log", self.service_name);
        }
        if self.environment.is_empty() {
            self.environment = env_or(ENV_APP_ENV, "dev");
        }
        if self.version.is_empty() {
            self.version = env_or(ENV_APP_VERSION, "1.0.0");
        }
        self
    }

    /// Development tier gets debug-level output and development mode.
    pub(crate) fn is_development(&self) -> bool {
        self.environment == "dev"
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
