//! # probegrid - Scanning-Probe Spectroscopy Grids in Parquet Containers
//!
//! `probegrid` translates fixed-layout Omicron `.asc` spectroscopy exports
//! (a parameter header followed by one tab-delimited spectrum per scan
//! position) into a self-describing `.pgrid` container that generic analysis
//! tools can open without knowing the instrument format.
//!
//! ## Key Features
//!
//! - **Typed header parsing**: every `# key = value` parameter is coerced once
//!   into an integer, float or string, with line numbers on every error.
//!
//! - **Columnar storage**: the measured grid and its coordinate axes are
//!   Apache Parquet datasets, ZSTD-compressed by default.
//!
//! - **Self-describing references**: the main dataset names its four
//!   ancillary datasets in its footer metadata, so readers can find the
//!   position and bias axes without conventions.
//!
//! - **Single file**: everything lives in one ZIP archive with a leading
//!   `mimetype` entry, like ODF or EPUB.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use probegrid::pipeline::{AcquisitionSettings, AscTranslator};
//!
//! let settings = AcquisitionSettings::new(1.0).with_scan_size(200.0, 100.0, "nm");
//! let summary = AscTranslator::default().translate_file("scan.asc", "scan.pgrid", &settings)?;
//! println!("Wrote {} spectra", summary.stats.num_positions);
//! # Ok::<(), probegrid::error::TranslateError>(())
//! ```
//!
//! Grids that are already in memory go straight to the container writer:
//!
//! ```rust,no_run
//! use probegrid::container::{ContainerWriter, TranslationRequest};
//! use probegrid::grid::RawGrid;
//!
//! let grid = RawGrid::from_vec(4, 3, vec![0.0; 12])?;
//! let request = TranslationRequest::builder(grid, 2, 2)
//!     .spectroscopic("Bias", "V", vec![-1.0, 0.0, 1.0])
//!     .scan_size(10.0, 10.0, "nm")
//!     .build()?;
//! ContainerWriter::default().translate("grid.pgrid", request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Container Layout
//!
//! ```text
//! scan.pgrid (ZIP archive)
//! ├── mimetype                                  application/vnd.probegrid
//! ├── manifest.json
//! └── Measurement_000/
//!     ├── attributes.json
//!     └── Channel_000/
//!         ├── attributes.json                   quantity, units, header parameters
//!         ├── Raw_Data.parquet                  one spectrum per position
//!         ├── Position_Indices.parquet          X (column), Y (row)
//!         ├── Position_Values.parquet           X, Y physical coordinates
//!         ├── Spectroscopic_Indices.parquet     bias bin
//!         └── Spectroscopic_Values.parquet      bias value
//! ```
//!
//! ## Architecture
//!
//! - [`layout`]: fixed line layout of the source format
//! - [`header`]: parameter block parser
//! - [`grid`]: data block reader
//! - [`axis`]: position and spectroscopic axes
//! - [`schema`]: container constants, Arrow schemas, manifest and attributes
//! - [`container`]: container writer
//! - [`pipeline`]: stage orchestration from source file to container
//! - [`reader`]: read-back API
//! - [`validator`]: container integrity checks

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod axis;
pub mod container;
pub mod error;
pub mod grid;
pub mod header;
pub mod layout;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::axis::{AncillaryAxis, PositionAxis, SpectroscopicAxis};
    pub use crate::container::{
        translate, CompressionType, ContainerConfig, ContainerError, ContainerStats,
        ContainerWriter, TranslationRequest,
    };
    pub use crate::error::{ErrorKind, TranslateError};
    pub use crate::grid::{GridReader, GridShape, RawGrid};
    pub use crate::header::{HeaderParser, ParameterMap, ParameterValue};
    pub use crate::layout::{AscLayout, AscSource, DuplicateKeyPolicy};
    pub use crate::pipeline::{AcquisitionSettings, AscTranslator, TranslationSummary};
    pub use crate::reader::{ContainerReader, ContainerSummary, ReaderConfig, ReaderError};
    pub use crate::schema::{Manifest, SourceFileInfo, FORMAT_VERSION, PROBEGRID_MIMETYPE};
    pub use crate::validator::{validate_container, ValidationReport};
}
