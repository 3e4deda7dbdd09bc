//! Configuration handling for a scan run.
//!
//! Two sources feed a run: the companies file (YAML, see [`companies`]) which
//! says *what* to scan, and a handful of environment variables which tune
//! *how* pages are fetched. `Settings::from_env` reads the latter with
//! development defaults so the binary runs without any environment set.

pub mod companies;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::extractor::rules::RuleError;

pub use companies::{CompanyConfig, ScanConfig};

/// Environment variable names.
pub const ENV_USER_AGENT: &str = "JOBSWEEP_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "JOBSWEEP_TIMEOUT_SECS";
pub const ENV_DELAY_MS: &str = "JOBSWEEP_DELAY_MS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; jobsweep/0.1)";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DELAY_MS: u64 = 500;

/// Runtime settings for fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    user_agent: String,
    request_timeout: Duration,
    politeness_delay: Duration,
}

impl Settings {
    pub fn new(
        user_agent: impl Into<String>,
        request_timeout: Duration,
        politeness_delay: Duration,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            request_timeout,
            politeness_delay,
        }
    }

    /// Load from environment variables, falling back to defaults for any
    /// that are unset. A set-but-unparseable number is an error rather
    /// than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_agent = env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = read_u64(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        let delay_ms = read_u64(ENV_DELAY_MS, DEFAULT_DELAY_MS)?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS,
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Self::new(
            user_agent,
            Duration::from_secs(timeout_secs),
            Duration::from_millis(delay_ms),
        ))
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Total per-request timeout, body included.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
    /// Pause inserted after each company whose page was fetched.
    pub fn politeness_delay(&self) -> Duration {
        self.politeness_delay
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(
            DEFAULT_USER_AGENT,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_millis(DEFAULT_DELAY_MS),
        )
    }
}

fn read_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: key,
            reason: format!("expected a non-negative integer, got '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed companies file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("the global include rule list is empty; refusing to run a scan that can match nothing")]
    EmptyInclude,

    #[error(transparent)]
    Rule(#[from] RuleError),
}
