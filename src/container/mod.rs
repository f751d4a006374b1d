//! # Container Writer
//!
//! Assembles a translated grid, its coordinate axes and the header parameters
//! into a single `.pgrid` ZIP archive (see [`crate::schema`] for the layout).
//!
//! ```no_run
//! use probegrid::container::{ContainerConfig, ContainerWriter, TranslationRequest};
//! use probegrid::grid::RawGrid;
//!
//! let grid = RawGrid::from_vec(4, 3, vec![0.0; 12])?;
//! let request = TranslationRequest::builder(grid, 2, 2)
//!     .quantity("Current", "nA")
//!     .spectroscopic("Bias", "V", vec![-1.0, 0.0, 1.0])
//!     .scan_size(200.0, 100.0, "nm")
//!     .build()?;
//!
//! let writer = ContainerWriter::new(ContainerConfig::default());
//! let path = writer.translate("grid.pgrid", request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The main dataset and the four ancillary datasets are encoded as Parquet
//! in memory first; only then is the destination created with
//! `create_new`. A failure while writing the archive can leave a partial
//! file at the destination; removing it is the caller's responsibility.

mod config;
mod error;
mod request;
mod stats;
mod writer_impl;


pub use config::{CompressionType, ContainerConfig, ZSTD_MAX_LEVEL, ZSTD_MIN_LEVEL};
pub use error::{ContainerError, WriteFailure};
pub use request::{
    TranslationRequest, TranslationRequestBuilder, DEFAULT_DATA_TYPE, DEFAULT_DATA_UNIT,
    DEFAULT_QUANTITY, DEFAULT_SPATIAL_UNIT, DEFAULT_TRANSLATOR,
};
pub use stats::ContainerStats;
pub use writer_impl::{translate, ContainerWriter};
