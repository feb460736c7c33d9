//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use formpilot_protocols::FormDefinition;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub autofill: AutofillStoreConfig,

    #[serde(default)]
    pub sensitive: SensitiveConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub form: FormDefinition,
}

/// Base directory for formpilot state (`~/.formpilot`).
pub fn formpilot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".formpilot")
}

/// Autofill store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutofillStoreConfig {
    /// JSON file holding field name -> last value. `~` is expanded.
    #[serde(default = "default_autofill_path")]
    pub path: String,
}

impl Default for AutofillStoreConfig {
    fn default() -> Self {
        Self {
            path: default_autofill_path(),
        }
    }
}

fn default_autofill_path() -> String {
    "~/.formpilot/autofill.json".to_string()
}

/// Secret used for sensitive-field encryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveConfig {
    /// Inline secret. Takes precedence over `secret_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Environment variable read at runtime. Absent or empty disables encryption.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for SensitiveConfig {
    fn default() -> Self {
        Self {
            secret: None,
            secret_env: default_secret_env(),
        }
    }
}

impl SensitiveConfig {
    /// Resolve the configured secret, if any.
    pub fn resolve_secret(&self) -> Option<String> {
        self.secret
            .clone()
            .or_else(|| std::env::var(&self.secret_env).ok())
            .filter(|s| !s.is_empty())
    }
}

fn default_secret_env() -> String {
    "FORMPILOT_SECRET".to_string()
}

/// Spacing between automation passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Minimum milliseconds between pass starts. 0 disables throttling.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    1000
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory. Defaults to `~/.formpilot/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}
