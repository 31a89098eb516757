//! Configuration loading
//!
//! `defaults/regerize.default.toml` is embedded into the crate so that the
//! documented defaults and the runtime defaults stay in sync. Callers layer
//! their own files and overrides on top via [`Loader`] before deserializing
//! into [`RegerizeConfig`].

use crate::compiler::CompileOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/regerize.default.toml");

/// File name picked up from the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILE: &str = "regerize.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegerizeConfig {
    pub compiler: CompileOptions,
}

/// Builds a [`RegerizeConfig`] from the embedded defaults plus any number of
/// TOML layers. Later layers win; overrides win over every file.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when it does not exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Force a dotted key such as `compiler.validate`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<RegerizeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<RegerizeConfig, ConfigError> {
    Loader::new().build()
}
