//! # probegrid Container Schema
//!
//! Names, Arrow schemas and footer keys of the `.pgrid` container.
//!
//! ## Layout
//!
//! ```text
//! {name}.pgrid (ZIP archive)
//! ├── mimetype                                "application/vnd.probegrid" (Stored, first entry)
//! ├── manifest.json                           version, provenance, entry list (Deflate)
//! └── Measurement_000/
//!     ├── attributes.json                     measurement group attributes
//!     └── Channel_000/
//!         ├── attributes.json                 channel attributes and header parameters
//!         ├── Raw_Data.parquet                main dataset
//!         ├── Position_Indices.parquet        X (col), Y (row)
//!         ├── Position_Values.parquet         X, Y physical coordinates
//!         ├── Spectroscopic_Indices.parquet   sweep bin
//!         └── Spectroscopic_Values.parquet    sweep value
//! ```
//!
//! ## Dataset Columns
//!
//! | Dataset | Column | Type |
//! |---------|--------|------|
//! | Raw_Data | spectrum | FixedSizeList<Float32>[spectral_length] |
//! | Position_Indices | X, Y | UInt32 |
//! | Position_Values | X, Y | Float64 |
//! | Spectroscopic_Indices | `<spec_name>` | UInt32 |
//! | Spectroscopic_Values | `<spec_name>` | Float64 |
//!
//! Every column carries its physical unit in the `unit` field metadata.
//! Dataset attributes (name, shape, labels, units) live in the Parquet footer
//! key-value metadata under `probegrid:*` keys. Raw_Data additionally carries
//! `probegrid:quantity` and one `probegrid:ref:<name>` key per ancillary
//! dataset whose value is the sibling entry path.
//!
//! Parquet entries are Stored (not deflated) inside the ZIP so readers can
//! seek to byte offsets directly.

pub mod attributes;
mod builders;
mod constants;
pub mod manifest;

#[cfg(test)]
mod tests;

pub use builders::{
    create_indices_schema, create_raw_data_schema, create_raw_data_schema_arc,
    create_values_schema, raw_data_item_field, FIELD_UNIT,
};
pub use attributes::{ChannelAttributes, MeasurementAttributes};
pub use constants::*;
pub use manifest::{Manifest, SourceFileInfo};
