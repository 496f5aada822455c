//! Runtime diagnostics configuration.
//!
//! The engine reads its configuration once. An application can install one
//! explicitly with [`init`]; otherwise it is loaded from `RXLITE_*` environment
//! variables, falling back to [`DiagnosticsConfig::default`].

use std::sync::OnceLock;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the environment variables read by [`DiagnosticsConfig::from_env`].
pub const ENV_PREFIX: &str = "RXLITE";

static CONFIG: OnceLock<DiagnosticsConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to parse environment variables: {0}")]
    Env(#[from] serde_env::Error),

    #[error("Diagnostics config has already been initialized")]
    AlreadyInitialized,
}

/// Switches for the engine's debugging aids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Count live subscriptions and report the ones dropped without ever being
    /// disposed. See [`crate::registry`].
    pub track_leaks: bool,

    /// Log events a producer emits after its subscription was terminated or
    /// disposed.
    pub log_dropped_events: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            track_leaks: cfg!(debug_assertions),
            log_dropped_events: false,
        }
    }
}

impl DiagnosticsConfig {
    /// Reads the configuration from `RXLITE_*` environment variables. Missing
    /// variables keep their default value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = serde_env::from_env_with_prefix(ENV_PREFIX)?;

        Ok(config)
    }
}

/// Installs `config` for the rest of the process.
///
/// Fails if a configuration is already in place, either from an earlier call or
/// because the engine already loaded one lazily.
pub fn init(config: DiagnosticsConfig) -> Result<(), ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The configuration in effect.
pub fn current() -> DiagnosticsConfig {
    *CONFIG.get_or_init(|| match DiagnosticsConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            warn!("{}, using default diagnostics config", error);
            DiagnosticsConfig::default()
        }
    })
}
