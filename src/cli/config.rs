//! TOML configuration file support.
//!
//! Settings that rarely change between runs can live in a config file
//! instead of on the command line:
//!
//! ```toml
//! # probegrid.toml
//! [layout]
//! header_length = 403
//! duplicate_keys = "last-write-wins"
//!
//! [axes]
//! max_v = 1.0
//! scan_width = 200.0
//! scan_height = 100.0
//! spatial_unit = "nm"
//!
//! [container]
//! compression_level = 9
//! overwrite = true
//! ```
//!
//! Command-line flags take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use probegrid::layout::AscLayout;

/// Root configuration structure for probegrid.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Source line layout.
    #[serde(default)]
    pub layout: AscLayout,

    /// Acquisition settings the source does not carry.
    #[serde(default)]
    pub axes: AxesConfig,

    /// Container writer settings.
    #[serde(default)]
    pub container: ContainerFileConfig,
}

/// `[axes]` section.
#[derive(Debug, Default, Deserialize)]
pub struct AxesConfig {
    /// Bias sweep amplitude.
    pub max_v: Option<f64>,

    /// Physical extent along X.
    pub scan_width: Option<f64>,

    /// Physical extent along Y.
    pub scan_height: Option<f64>,

    /// Unit of the scan extents.
    pub spatial_unit: Option<String>,

    /// Measured quantity name.
    pub quantity: Option<String>,

    /// Unit of the measured quantity.
    pub data_unit: Option<String>,
}

/// `[container]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ContainerFileConfig {
    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Rows per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Replace an existing container at the destination.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use probegrid::layout::DuplicateKeyPolicy;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [layout]
            header_length = 10
            duplicate_keys = "last-write-wins"

            [axes]
            max_v = 2.5
            scan_width = 50.0
            spatial_unit = "um"

            [container]
            compression_level = 15
            row_group_size = 1024
            overwrite = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.layout.header_length, 10);
        assert_eq!(config.layout.parameter_start, 3);
        assert_eq!(config.layout.duplicate_keys, DuplicateKeyPolicy::LastWriteWins);
        assert_eq!(config.axes.max_v, Some(2.5));
        assert_eq!(config.axes.scan_width, Some(50.0));
        assert_eq!(config.axes.scan_height, None);
        assert_eq!(config.axes.spatial_unit.as_deref(), Some("um"));
        assert_eq!(config.container.compression_level, Some(15));
        assert_eq!(config.container.row_group_size, Some(1024));
        assert_eq!(config.container.overwrite, Some(true));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.layout, AscLayout::omicron());
        assert_eq!(config.axes.max_v, None);
        assert_eq!(config.container.compression_level, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[axes]\nmax_v = \"one\"").is_err());
    }
}
