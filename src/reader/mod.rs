//! # Container Reader
//!
//! Reads `.pgrid` containers back into memory.
//!
//! The whole archive is loaded when opened; each Parquet entry is kept as
//! [`bytes::Bytes`] and decoded on demand.
//!
//! ## Example
//!
//! ```rust,no_run
//! use probegrid::reader::ContainerReader;
//!
//! let reader = ContainerReader::open("grid.pgrid")?;
//! println!("Quantity: {}", reader.channel().quantity);
//!
//! let grid = reader.raw_data()?;
//! let bias = reader.spectroscopic_values()?;
//! println!("{} spectra over {} bias points", grid.num_positions(), bias.len());
//!
//! for (name, path) in reader.references()? {
//!     println!("{} -> {}", name, path);
//! }
//! # Ok::<(), probegrid::reader::ReaderError>(())
//! ```

mod config;
mod datasets;
mod error;
mod metadata;
mod open;
mod summary;
mod utils;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::schema::{ChannelAttributes, Manifest, MeasurementAttributes};

pub use config::ReaderConfig;
pub use datasets::AxisColumns;
pub use error::ReaderError;
pub use metadata::DatasetMetadata;
pub use summary::ContainerSummary;

/// Reader for probegrid containers
pub struct ContainerReader {
    path: PathBuf,
    config: ReaderConfig,
    manifest: Manifest,
    measurement: MeasurementAttributes,
    channel: ChannelAttributes,
    entries: BTreeMap<String, Bytes>,
}

impl ContainerReader {
    /// Path the container was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Container manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Measurement group attributes
    pub fn measurement(&self) -> &MeasurementAttributes {
        &self.measurement
    }

    /// Channel group attributes, including the header parameters
    pub fn channel(&self) -> &ChannelAttributes {
        &self.channel
    }

    /// Names of all file entries, sorted
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
