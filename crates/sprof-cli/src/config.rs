//! CLI configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! [log]
//! level = "debug"
//!
//! [generate]
//! asset_extension = ".asset"
//! output_dir = "build/profiles"
//! ```
//!
//! Missing sections and keys take their defaults. Command-line flags
//! override file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use sprof_profile::GeneratorConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Logging settings
    pub log: LogConfig,
    /// Script generation settings
    pub generate: GenerateConfig,
}

/// `[log]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `[generate]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Extension of generated fragment files, including the dot
    pub asset_extension: String,
    /// Directory fragment files are written to; the profile's directory
    /// when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            asset_extension: GeneratorConfig::default().asset_extension,
            output_dir: None,
        }
    }
}

impl CliConfig {
    /// Parse configuration text
    ///
    /// # Errors
    /// Returns error on malformed TOML or unknown keys
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load configuration from a file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `path` if given, defaults otherwise
    ///
    /// # Errors
    /// See [`CliConfig::load`]
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Generator settings for the library
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new().with_asset_extension(self.generate.asset_extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.generate.asset_extension, ".asset");
        assert!(config.generate.output_dir.is_none());
        assert_eq!(config.generator_config(), GeneratorConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn partial_sections() {
        let config = CliConfig::from_toml("[generate]\nasset_extension = \".lua\"\n").unwrap();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.generate.asset_extension, ".lua");
        assert_eq!(config.generator_config().asset_extension, ".lua");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::from_toml("[log]\ncolour = true\n").is_err());
    }
}
