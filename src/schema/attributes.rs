//! Group attribute documents (`attributes.json`).

use serde::{Deserialize, Serialize};

use crate::header::ParameterMap;

/// Attributes of the measurement group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementAttributes {
    /// Data-type tag, e.g. "STS"
    pub data_type: String,
    /// Translator-name tag, e.g. "ASC"
    pub translator: String,
    /// Channel groups owned by this measurement
    pub channels: Vec<String>,
}

/// Attributes of a channel group.
///
/// `parameters` holds every header parameter: numbers as JSON numbers,
/// everything else as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAttributes {
    /// Measured quantity, e.g. "Current"
    pub quantity: String,
    /// Unit of the measured quantity
    pub data_unit: String,
    /// Unit of the position axis
    pub spatial_unit: String,
    /// Data-type tag
    pub data_type: String,
    /// Translator-name tag
    pub translator: String,
    /// Raster rows
    pub num_rows: u64,
    /// Raster columns
    pub num_cols: u64,
    /// Values per spectrum
    pub spectral_length: u64,
    /// Physical extent along X
    pub scan_width: f64,
    /// Physical extent along Y
    pub scan_height: f64,
    /// Spectroscopic dimension name
    pub spec_name: String,
    /// Spectroscopic dimension unit
    pub spec_unit: String,
    /// Header parameters
    pub parameters: ParameterMap,
}

impl ChannelAttributes {
    /// Rows of the main dataset
    pub fn num_positions(&self) -> u64 {
        self.num_rows * self.num_cols
    }
}
