use crate::axis::{DEFAULT_SPEC_NAME, DEFAULT_SPEC_UNIT};
use crate::grid::RawGrid;
use crate::header::ParameterMap;
use crate::schema::SourceFileInfo;

use super::error::ContainerError;

/// Default measured quantity
pub const DEFAULT_QUANTITY: &str = "Current";

/// Default unit of the measured quantity
pub const DEFAULT_DATA_UNIT: &str = "nA";

/// Default spatial unit
pub const DEFAULT_SPATIAL_UNIT: &str = "nm";

/// Default data-type tag
pub const DEFAULT_DATA_TYPE: &str = "STS";

/// Default translator-name tag
pub const DEFAULT_TRANSLATOR: &str = "ASC";

/// Everything the container writer needs for one translation.
///
/// Built with [`TranslationRequestBuilder`], which checks that the grid,
/// the raster counts and the spectroscopic values agree.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Main dataset
    pub raw_grid: RawGrid,
    /// Raster rows
    pub num_rows: usize,
    /// Raster columns
    pub num_cols: usize,
    /// Measured quantity, e.g. "Current"
    pub quantity_name: String,
    /// Unit of the measured quantity
    pub data_unit: String,
    /// Name of the spectroscopic dimension
    pub spec_name: String,
    /// Unit of the spectroscopic dimension
    pub spec_unit: String,
    /// Spectroscopic values, one per spectral point
    pub spec_values: Vec<f64>,
    /// Physical extent along Y
    pub scan_height: f64,
    /// Physical extent along X
    pub scan_width: f64,
    /// Unit of the scan extents
    pub spatial_unit: String,
    /// Data-type tag, e.g. "STS"
    pub data_type: String,
    /// Translator-name tag, e.g. "ASC"
    pub translator_name: String,
    /// Header parameters attached to the channel
    pub parameters: ParameterMap,
    /// Provenance recorded in the manifest
    pub source_file: Option<SourceFileInfo>,
}

impl TranslationRequest {
    /// Start building a request for `raw_grid` laid out as `num_rows` x
    /// `num_cols` positions
    pub fn builder(raw_grid: RawGrid, num_rows: usize, num_cols: usize) -> TranslationRequestBuilder {
        TranslationRequestBuilder::new(raw_grid, num_rows, num_cols)
    }

    /// Rows of the main dataset
    pub fn num_positions(&self) -> usize {
        self.raw_grid.num_positions()
    }

    /// Values per spectrum
    pub fn spectral_length(&self) -> usize {
        self.raw_grid.spectral_length()
    }
}

/// Builder for [`TranslationRequest`]
#[derive(Debug, Clone)]
pub struct TranslationRequestBuilder {
    raw_grid: RawGrid,
    num_rows: usize,
    num_cols: usize,
    quantity_name: String,
    data_unit: String,
    spec_name: String,
    spec_unit: String,
    spec_values: Option<Vec<f64>>,
    scan_size: Option<(f64, f64)>,
    spatial_unit: String,
    data_type: String,
    translator_name: String,
    parameters: ParameterMap,
    source_file: Option<SourceFileInfo>,
}

impl TranslationRequestBuilder {
    /// New builder with the default quantity, units and tags
    pub fn new(raw_grid: RawGrid, num_rows: usize, num_cols: usize) -> Self {
        Self {
            raw_grid,
            num_rows,
            num_cols,
            quantity_name: DEFAULT_QUANTITY.to_string(),
            data_unit: DEFAULT_DATA_UNIT.to_string(),
            spec_name: DEFAULT_SPEC_NAME.to_string(),
            spec_unit: DEFAULT_SPEC_UNIT.to_string(),
            spec_values: None,
            scan_size: None,
            spatial_unit: DEFAULT_SPATIAL_UNIT.to_string(),
            data_type: DEFAULT_DATA_TYPE.to_string(),
            translator_name: DEFAULT_TRANSLATOR.to_string(),
            parameters: ParameterMap::default(),
            source_file: None,
        }
    }

    /// Measured quantity and its unit
    pub fn quantity(mut self, name: impl Into<String>, unit: impl Into<String>) -> Self {
        self.quantity_name = name.into();
        self.data_unit = unit.into();
        self
    }

    /// Spectroscopic dimension name, unit and values
    pub fn spectroscopic(
        mut self,
        name: impl Into<String>,
        unit: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        self.spec_name = name.into();
        self.spec_unit = unit.into();
        self.spec_values = Some(values);
        self
    }

    /// Physical scan extents and their unit
    pub fn scan_size(mut self, width: f64, height: f64, unit: impl Into<String>) -> Self {
        self.scan_size = Some((width, height));
        self.spatial_unit = unit.into();
        self
    }

    /// Data-type tag
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Translator-name tag
    pub fn translator_name(mut self, name: impl Into<String>) -> Self {
        self.translator_name = name.into();
        self
    }

    /// Header parameters
    pub fn parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    /// Source provenance
    pub fn source_file(mut self, source: SourceFileInfo) -> Self {
        self.source_file = Some(source);
        self
    }

    /// Finish the request, checking dimensions
    pub fn build(self) -> Result<TranslationRequest, ContainerError> {
        let spec_values = self
            .spec_values
            .ok_or(ContainerError::MissingField("spectroscopic values"))?;
        let (scan_width, scan_height) = self
            .scan_size
            .ok_or(ContainerError::MissingField("scan size"))?;

        let num_positions = self.raw_grid.num_positions();
        let expected_positions =
            self.num_rows
                .checked_mul(self.num_cols)
                .ok_or(ContainerError::DimensionMismatch {
                    what: "num_rows * num_cols",
                    expected: num_positions,
                    actual: usize::MAX,
                })?;
        if expected_positions != num_positions {
            return Err(ContainerError::DimensionMismatch {
                what: "positions",
                expected: expected_positions,
                actual: num_positions,
            });
        }
        if spec_values.len() != self.raw_grid.spectral_length() {
            return Err(ContainerError::DimensionMismatch {
                what: "spectroscopic values",
                expected: self.raw_grid.spectral_length(),
                actual: spec_values.len(),
            });
        }

        Ok(TranslationRequest {
            raw_grid: self.raw_grid,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
            quantity_name: self.quantity_name,
            data_unit: self.data_unit,
            spec_name: self.spec_name,
            spec_unit: self.spec_unit,
            spec_values,
            scan_height,
            scan_width,
            spatial_unit: self.spatial_unit,
            data_type: self.data_type,
            translator_name: self.translator_name,
            parameters: self.parameters,
            source_file: self.source_file,
        })
    }
}
