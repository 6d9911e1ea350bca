//! Configuration loading
//!
//! `defaults/rst.default.toml` is embedded into the binary so that documented
//! and runtime defaults stay in sync. User files and single-key overrides are
//! layered on top with [`Loader`] before deserializing into [`RstConfig`].

use crate::rst::assembling::NumberingScheme;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../../defaults/rst.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct RstConfig {
    pub annotator: AnnotatorConfig,
    pub numbering: NumberingScheme,
    #[serde(default)]
    pub resources: ResourcesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatorConfig {
    pub url: String,
    pub annotators: String,
    pub timeout_secs: u64,
}

impl AnnotatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcesConfig {
    #[serde(default)]
    pub clusters: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub margin: usize,
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags)
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<RstConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<RstConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.annotator.url, "http://localhost:9000");
        assert_eq!(config.annotator.timeout(), Duration::from_secs(60));
        assert_eq!(config.numbering, NumberingScheme::default());
        assert!(config.resources.clusters.is_none());
        assert_eq!(config.output.margin, 150);
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("numbering.sentence_base", 1)
            .expect("override to apply")
            .set_override("resources.clusters", "clusters.txt")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.numbering.sentence_base, 1);
        assert_eq!(config.resources.clusters, Some(PathBuf::from("clusters.txt")));
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rst.toml");
        std::fs::write(&path, "[output]\nmargin = 80\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.output.margin, 80);
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/rst.toml").build();
        assert!(result.is_err());
    }
}
