//! Manifest schema for the probegrid container format.
//!
//! The manifest.json file declares the format version, provenance and the
//! list of entries, so readers can inspect a container before decoding any
//! Parquet data.

use serde::{Deserialize, Serialize};

use super::constants::FORMAT_VERSION;

/// Provenance of the translated source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileInfo {
    /// Original file name
    pub name: String,

    /// Original file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Source format (e.g. "Omicron ASCII grid")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl SourceFileInfo {
    /// Create new source file info with the given file name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Manifest of a probegrid container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version (e.g., "1.0.0")
    pub format_version: String,
    /// Unique identifier of this container
    pub id: uuid::Uuid,
    /// RFC 3339 timestamp of when the container was created
    pub created: String,
    /// Name and version of the converter that created the container
    pub converter: String,
    /// Number of scan positions in the main dataset
    pub num_positions: u64,
    /// Number of values per spectrum
    pub spectral_length: u64,
    /// Translated source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<SourceFileInfo>,
    /// Entry paths in archive order
    pub entries: Vec<String>,
}

impl Manifest {
    /// Creates a manifest stamped with a fresh id and the current time
    pub fn new(num_positions: u64, spectral_length: u64, converter: String) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            id: uuid::Uuid::new_v4(),
            created: chrono::Utc::now().to_rfc3339(),
            converter,
            num_positions,
            spectral_length,
            source_file: None,
            entries: Vec::new(),
        }
    }

    /// Default converter string, `probegrid v<version>`
    pub fn default_converter() -> String {
        format!("probegrid v{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the source file provenance
    pub fn with_source_file(mut self, source: Option<SourceFileInfo>) -> Self {
        self.source_file = source;
        self
    }
}
