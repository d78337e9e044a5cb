//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in a
//! config file:
//!
//! ```toml
//! # rawxrd.toml
//! [export]
//! x_unit = "reciprocal"
//! y_unit = "cps"
//! overwrite = true
//! parallel = true
//!
//! [fmr]
//! overwrite = false
//! ```
//!
//! Command-line flags take precedence over values from the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use rawxrd::quantities::{XUnit, YUnit};

/// Root configuration structure for rawxrd.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings for the convert command.
    #[serde(default)]
    pub export: ExportConfig,

    /// Settings for the fmr command.
    #[serde(default)]
    pub fmr: FmrConfig,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Angular axis units.
    pub x_unit: Option<XUnit>,

    /// Intensity units.
    pub y_unit: Option<YUnit>,

    /// Replace existing `.asc` files.
    pub overwrite: Option<bool>,

    /// Convert files in parallel (requires the parallel feature).
    pub parallel: Option<bool>,
}

/// Configuration for the fmr command.
#[derive(Debug, Default, Deserialize)]
pub struct FmrConfig {
    /// Replace existing CSV files.
    pub overwrite: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise the empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [export]
            x_unit = "reciprocal"
            y_unit = "cps"
            overwrite = true
            parallel = false

            [fmr]
            overwrite = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.export.x_unit, Some(XUnit::Reciprocal));
        assert_eq!(config.export.y_unit, Some(YUnit::Cps));
        assert_eq!(config.export.overwrite, Some(true));
        assert_eq!(config.export.parallel, Some(false));
        assert_eq!(config.fmr.overwrite, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [export]
            x_unit = "deg"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.export.x_unit, Some(XUnit::Deg));
        assert_eq!(config.export.y_unit, None);
        assert_eq!(config.fmr.overwrite, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.export.x_unit, None);
        assert_eq!(config.export.parallel, None);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let toml = r#"
            [export]
            x_unit = "radians"
        "#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_load_without_path() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.export.overwrite, None);
    }
}
