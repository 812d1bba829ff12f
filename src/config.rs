//! Compiler configuration.
//!
//! Config resolution order:
//! 1. Explicit path passed to [`CompilerConfig::load`]
//! 2. `CQL_CONFIG` environment variable
//! 3. Built-in defaults
//!
//! ```toml
//! default_shape = "work"
//! pos_codes = ["n", "v", "adj", "adv"]
//!
//! [schema]
//! word = "Word"
//! successor = "next"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codegen::{Codegen, ResultShape, Schema};

/// Errors loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CQL_CONFIG";

/// Compiler configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Shape used when none is requested.
    pub default_shape: ResultShape,

    /// Valid part-of-speech codes, as supplied by the store.
    pub pos_codes: Vec<String>,

    /// Entity names of the target store.
    pub schema: Schema,
}

impl CompilerConfig {
    /// Load from an explicit path, else from `CQL_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load_from(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), pos_codes = config.pos_codes.len(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Code generator configured from this config.
    pub fn codegen(&self) -> Codegen {
        Codegen::new()
            .with_schema(self.schema.clone())
            .with_pos_codes(self.pos_codes.iter().cloned())
    }
}
