// crates/hatchery-cli/src/config.rs
//
// Runtime configuration for the Hatchery CLI.
// Loaded from a TOML file or populated with defaults.

use hatchery_core::HatcheryError;
use hatchery_economics::ProjectionParams;
use serde::Deserialize;
use std::fs;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Parameters for the `project` subcommands.
    #[serde(default)]
    pub projection: ProjectionParams,

    /// Whether the values came from a file.
    #[serde(skip)]
    pub loaded: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            projection: ProjectionParams::default(),
            loaded: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns `HatcheryError::Config` if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, HatcheryError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| HatcheryError::Config(format!("{}: {}", path, e)))?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, HatcheryError> {
        let mut config: CliConfig =
            toml::from_str(contents).map_err(|e| HatcheryError::Config(e.to_string()))?;
        config.loaded = true;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults if the file is missing or
    /// malformed. Logging is not initialised yet, so parse failures go to
    /// stderr directly.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("Could not load config from {}: {}", path, e);
                }
                Self::default()
            }
        }
    }
}
