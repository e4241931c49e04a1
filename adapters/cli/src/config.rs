//! Layered configuration: defaults, then an optional TOML file, then flags.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use box_pusher_system_generator::{GenerationError, GeneratorConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::Cli;

/// Configuration file consulted when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "box-pusher.toml";

/// Configuration error.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid generator settings: {0}")]
    Generator(#[from] GenerationError),
}

/// Fully resolved application settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    /// Seed of the level seed stream; drawn from OS entropy when absent.
    pub(crate) seed: Option<u64>,
    pub(crate) generator: GeneratorConfig,
    pub(crate) persistence: PersistenceConfig,
    pub(crate) window: WindowConfig,
}

/// Snapshot storage settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PersistenceConfig {
    pub(crate) save_dir: PathBuf,
    pub(crate) enabled: bool,
    pub(crate) resume: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("."),
            enabled: true,
            resume: true,
        }
    }
}

/// Window settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Box Pushing Puzzle - Use WASD to move, SPACE to select".to_owned(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

impl AppConfig {
    /// Parses configuration from a TOML string.
    pub(crate) fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a TOML file.
    pub(crate) fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolves the configuration for a command line invocation.
    ///
    /// An explicit `--config` file must exist; the default file is optional.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_toml_file(path)?,
            None => match Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE)) {
                Ok(config) => config,
                Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    Self::default()
                }
                Err(error) => return Err(error),
            },
        };
        config.apply_overrides(cli);
        config.generator.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(width) = cli.width {
            self.generator.width = width;
        }
        if let Some(height) = cli.height {
            self.generator.height = height;
        }
        if let Some(save_dir) = &cli.save_dir {
            self.persistence.save_dir = save_dir.clone();
        }
        if cli.no_save {
            self.persistence.enabled = false;
        }
        if cli.fresh {
            self.persistence.resume = false;
        }
    }
}
