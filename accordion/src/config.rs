//! Process-wide accordion configuration.
//!
//! The configuration is owned by whoever embeds the accordion (usually the
//! application at startup). Panels read it on every command, so changes take
//! effect on the next expand/collapse without re-attaching anything.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

static GLOBAL: RwLock<Config> = RwLock::new(Config::DEFAULT);

/// Platform theme selector. Rendered as the mode class on the panel root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Ios,
    #[default]
    Md,
}

impl Mode {
    /// Class name for this mode.
    pub fn class_name(self) -> &'static str {
        match self {
            Mode::Ios => "ios",
            Mode::Md => "md",
        }
    }
}

/// Accordion configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch for expand/collapse animation.
    pub animated: bool,
    /// Platform theme.
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Config {
    pub const DEFAULT: Config = Config {
        animated: true,
        mode: Mode::Md,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Enable or disable animation.
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Set the platform mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Current process-wide configuration.
pub fn global() -> Config {
    GLOBAL
        .read()
        .map(|guard| *guard)
        .unwrap_or_else(|poisoned| *poisoned.into_inner())
}

/// Replace the process-wide configuration.
pub fn set_global(config: Config) {
    match GLOBAL.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Restore the process-wide configuration to its defaults.
pub fn reset_global() {
    set_global(Config::DEFAULT);
}
