//! # Translation Pipeline
//!
//! Runs the stages that turn an `.asc` source into a container:
//!
//! ```text
//! NotStarted -> ParsedHeader -> ParsedGrid -> BuiltAxes -> Written
//! ```
//!
//! Each stage consumes the previous stage's output; any failure stops the
//! run and nothing is written, since the destination is only opened once
//! every dataset has been encoded.
//!
//! ```rust,no_run
//! use probegrid::pipeline::{AcquisitionSettings, AscTranslator};
//!
//! let translator = AscTranslator::default();
//! let summary = translator.translate_file("grid.asc", "grid.pgrid", &AcquisitionSettings::new(1.0))?;
//! println!("{}", summary);
//! # Ok::<(), probegrid::error::TranslateError>(())
//! ```

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::axis::{AncillaryAxis, SpectroscopicAxis, DEFAULT_SPEC_NAME, DEFAULT_SPEC_UNIT};
use crate::container::{
    ContainerStats, ContainerWriter, TranslationRequest, DEFAULT_DATA_TYPE, DEFAULT_DATA_UNIT,
    DEFAULT_QUANTITY, DEFAULT_SPATIAL_UNIT, DEFAULT_TRANSLATOR,
};
use crate::error::TranslateError;
use crate::grid::{GridReader, GridShape};
use crate::header::HeaderParser;
use crate::layout::{AscLayout, AscSource};
use crate::schema::SourceFileInfo;
use crate::validator::{validate_container, ValidationError};

/// Source format recorded in the manifest
pub const SOURCE_FORMAT: &str = "Omicron ASCII grid";

/// Default scan width
pub const DEFAULT_SCAN_WIDTH: f64 = 200.0;

/// Default scan height
pub const DEFAULT_SCAN_HEIGHT: f64 = 100.0;

/// Acquisition details that the source file does not carry.
///
/// `max_v` has no default: the bias sweep amplitude must come from the
/// operator.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionSettings {
    /// Bias sweep amplitude; the sweep runs from `-max_v` to `+max_v`
    pub max_v: f64,
    /// Physical extent along X
    pub scan_width: f64,
    /// Physical extent along Y
    pub scan_height: f64,
    /// Unit of the scan extents
    pub spatial_unit: String,
    /// Measured quantity
    pub quantity: String,
    /// Unit of the measured quantity
    pub data_unit: String,
    /// Spectroscopic dimension name
    pub spec_name: String,
    /// Spectroscopic dimension unit
    pub spec_unit: String,
    /// Data-type tag
    pub data_type: String,
    /// Translator-name tag
    pub translator: String,
}

impl AcquisitionSettings {
    /// Settings with the given sweep amplitude and defaults for the rest
    pub fn new(max_v: f64) -> Self {
        Self {
            max_v,
            scan_width: DEFAULT_SCAN_WIDTH,
            scan_height: DEFAULT_SCAN_HEIGHT,
            spatial_unit: DEFAULT_SPATIAL_UNIT.to_string(),
            quantity: DEFAULT_QUANTITY.to_string(),
            data_unit: DEFAULT_DATA_UNIT.to_string(),
            spec_name: DEFAULT_SPEC_NAME.to_string(),
            spec_unit: DEFAULT_SPEC_UNIT.to_string(),
            data_type: DEFAULT_DATA_TYPE.to_string(),
            translator: DEFAULT_TRANSLATOR.to_string(),
        }
    }

    /// Set the scan extents and their unit
    pub fn with_scan_size(mut self, width: f64, height: f64, unit: impl Into<String>) -> Self {
        self.scan_width = width;
        self.scan_height = height;
        self.spatial_unit = unit.into();
        self
    }

    /// Set the measured quantity and its unit
    pub fn with_quantity(mut self, name: impl Into<String>, unit: impl Into<String>) -> Self {
        self.quantity = name.into();
        self.data_unit = unit.into();
        self
    }
}

/// Pipeline progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing done yet
    NotStarted,
    /// Parameter block parsed
    ParsedHeader,
    /// Data block parsed
    ParsedGrid,
    /// Spectroscopic axis built
    BuiltAxes,
    /// Container written
    Written,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::NotStarted => "not started",
            Stage::ParsedHeader => "parsed header",
            Stage::ParsedGrid => "parsed grid",
            Stage::BuiltAxes => "built axes",
            Stage::Written => "written",
        };
        f.write_str(name)
    }
}

/// Result of a successful translation
#[derive(Debug, Clone)]
pub struct TranslationSummary {
    /// Grid dimensions read from the header
    pub shape: GridShape,
    /// First and last spectroscopic value
    pub spec_range: (f64, f64),
    /// Number of header parameters
    pub num_parameters: usize,
    /// Container write statistics
    pub stats: ContainerStats,
}

impl fmt::Display for TranslationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Output:      {}", self.stats.path.display())?;
        writeln!(
            f,
            "Grid:        {} x {} positions, {} points each",
            self.shape.num_rows, self.shape.num_cols, self.shape.spectral_length
        )?;
        writeln!(
            f,
            "Sweep:       {} to {}",
            self.spec_range.0, self.spec_range.1
        )?;
        writeln!(f, "Parameters:  {}", self.num_parameters)?;
        write!(f, "Size:        {} bytes", self.stats.total_size_bytes)
    }
}

/// Translates `.asc` sources into containers
#[derive(Debug, Clone, Default)]
pub struct AscTranslator {
    layout: AscLayout,
    writer: ContainerWriter,
    verify: bool,
}

impl AscTranslator {
    /// Translator for sources with `layout`, writing through `writer`
    pub fn new(layout: AscLayout, writer: ContainerWriter) -> Self {
        Self {
            layout,
            writer,
            verify: false,
        }
    }

    /// Validate each container after writing it
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Source layout
    pub fn layout(&self) -> &AscLayout {
        &self.layout
    }

    /// Translate the file at `input` into a container at `output`
    pub fn translate_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        settings: &AcquisitionSettings,
    ) -> Result<TranslationSummary, TranslateError> {
        let input = input.as_ref();
        info!("Reading {}", input.display());
        let source = AscSource::from_path(input).map_err(|source| TranslateError::Source {
            path: input.to_path_buf(),
            source,
        })?;
        self.translate_source(&source, output, settings)
    }

    /// Translate an in-memory source
    pub fn translate_source<Q: AsRef<Path>>(
        &self,
        source: &AscSource,
        output: Q,
        settings: &AcquisitionSettings,
    ) -> Result<TranslationSummary, TranslateError> {
        let mut stage = Stage::NotStarted;
        let result = self.run_stages(source, output.as_ref(), settings, &mut stage);
        if let Err(e) = &result {
            warn!("Translation stopped at stage '{}': {}", stage, e);
        }
        result
    }

    fn run_stages(
        &self,
        source: &AscSource,
        output: &Path,
        settings: &AcquisitionSettings,
        stage: &mut Stage,
    ) -> Result<TranslationSummary, TranslateError> {
        let parameters = HeaderParser::from_layout(&self.layout).parse_source(source, &self.layout)?;
        let shape = GridShape::from_parameters(&parameters)?;
        *stage = Stage::ParsedHeader;
        info!(
            "Header: {} parameters, {} x {} grid, {} points",
            parameters.len(),
            shape.num_rows,
            shape.num_cols,
            shape.spectral_length
        );

        let grid = GridReader::new(shape).read_source(source, &self.layout)?;
        *stage = Stage::ParsedGrid;
        debug!("Read {} spectra", grid.num_positions());

        let spectroscopic = SpectroscopicAxis::linear(
            &settings.spec_name,
            &settings.spec_unit,
            settings.max_v,
            shape.spectral_length,
        )?;
        let spec_range = (spectroscopic.first(), spectroscopic.last());
        *stage = Stage::BuiltAxes;
        debug!(
            "{} axis: {} points from {} to {} {}",
            spectroscopic.name(),
            spectroscopic.len(),
            spec_range.0,
            spec_range.1,
            spectroscopic.unit()
        );

        let num_parameters = parameters.len();
        let mut builder = TranslationRequest::builder(grid, shape.num_rows, shape.num_cols)
            .quantity(&settings.quantity, &settings.data_unit)
            .spectroscopic(
                spectroscopic.name(),
                spectroscopic.unit(),
                spectroscopic.values().to_vec(),
            )
            .scan_size(settings.scan_width, settings.scan_height, &settings.spatial_unit)
            .data_type(&settings.data_type)
            .translator_name(&settings.translator)
            .parameters(parameters);
        if let Some(info) = source_file_info(source) {
            builder = builder.source_file(info);
        }
        let request = builder.build()?;

        let stats = self.writer.write(output, request)?;
        *stage = Stage::Written;

        if self.verify {
            verify_container(output)?;
        }

        Ok(TranslationSummary {
            shape,
            spec_range,
            num_parameters,
            stats,
        })
    }
}

/// Provenance of a source read from disk; in-memory sources have none
fn source_file_info(source: &AscSource) -> Option<SourceFileInfo> {
    let path = source.path()?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Some(SourceFileInfo {
        name,
        path: Some(path.display().to_string()),
        format: Some(SOURCE_FORMAT.to_string()),
        size_bytes: Some(source.len_bytes()),
    })
}

fn verify_container(path: &Path) -> Result<(), ValidationError> {
    let report = validate_container(path).map_err(|e| match e.downcast::<ValidationError>() {
        Ok(err) => err,
        Err(other) => ValidationError::StructureError(other.to_string()),
    })?;
    if report.has_failures() {
        for check in report.failures() {
            warn!("Validation check failed: {}", check.name);
        }
        return Err(ValidationError::FailedChecks(report.failure_count()));
    }
    debug!("{} passed {} checks", path.display(), report.success_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::grid::GridError;
    use crate::header::HeaderError;
    use crate::reader::ContainerReader;
    use tempfile::tempdir;

    /// Omicron-shaped text: 3 preamble lines, parameters on lines 4-17,
    /// padding to 403 header lines, then `data_rows` spectra.
    fn synthetic_asc(cols: usize, rows: usize, points: usize, data_rows: usize) -> String {
        let mut lines = vec![
            "# Omicron spectroscopy export".to_string(),
            "#".to_string(),
            "#".to_string(),
            format!("# x-pixels = {}", cols),
            format!("# y-pixels = {}", rows),
            format!("# z-points = {}", points),
            "# x-length = 200.0".to_string(),
            "# y-length = 100.0".to_string(),
            "# mode = CITS".to_string(),
        ];
        while lines.len() < 17 {
            lines.push(format!("# extra-{} = {}", lines.len(), lines.len()));
        }
        while lines.len() < 403 {
            lines.push("# ignored".to_string());
        }
        for row in 0..data_rows {
            let mut line = String::new();
            for point in 0..points {
                line.push_str(&format!("{}\t", row * points + point));
            }
            lines.push(line);
        }
        lines.join("\n") + "\n"
    }

    #[test]
    fn test_translate_source() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("grid.pgrid");
        let source = AscSource::from_text(synthetic_asc(4, 3, 5, 12));

        let summary = AscTranslator::default()
            .translate_source(&source, &output, &AcquisitionSettings::new(2.0))
            .unwrap();
        assert_eq!(summary.shape, GridShape::new(3, 4, 5).unwrap());
        assert_eq!(summary.spec_range, (-2.0, 2.0));
        assert_eq!(summary.num_parameters, 14);
        assert_eq!(summary.stats.num_positions, 12);

        let reader = ContainerReader::open(&output).unwrap();
        let grid = reader.raw_data().unwrap();
        assert_eq!(grid.shape(), (12, 5));
        assert_eq!(grid.get(11, 4), Some(59.0));
        assert_eq!(reader.channel().scan_width, DEFAULT_SCAN_WIDTH);
        assert_eq!(reader.channel().data_type, DEFAULT_DATA_TYPE);
        assert!(reader.manifest().source_file.is_none());
    }

    #[test]
    fn test_translate_file_records_source() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("scan.asc");
        let output = dir.path().join("scan.pgrid");
        std::fs::write(&input, synthetic_asc(2, 2, 3, 4)).unwrap();

        let settings = AcquisitionSettings::new(0.5)
            .with_scan_size(50.0, 25.0, "nm")
            .with_quantity("Current", "pA");
        let summary = AscTranslator::default()
            .with_verification(true)
            .translate_file(&input, &output, &settings)
            .unwrap();
        assert!(summary.to_string().contains("2 x 2 positions"));

        let reader = ContainerReader::open(&output).unwrap();
        let source = reader.manifest().source_file.clone().unwrap();
        assert_eq!(source.name, "scan.asc");
        assert_eq!(source.format.as_deref(), Some(SOURCE_FORMAT));
        assert_eq!(source.size_bytes, Some(std::fs::metadata(&input).unwrap().len()));
        assert_eq!(reader.channel().data_unit, "pA");
        assert_eq!(reader.channel().scan_height, 25.0);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let err = AscTranslator::default()
            .translate_file(
                dir.path().join("absent.asc"),
                dir.path().join("out.pgrid"),
                &AcquisitionSettings::new(1.0),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!dir.path().join("out.pgrid").exists());
    }

    #[test]
    fn test_short_data_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("grid.pgrid");
        let source = AscSource::from_text(synthetic_asc(10, 10, 5, 50));

        let err = AscTranslator::default()
            .translate_source(&source, &output, &AcquisitionSettings::new(1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::Grid(GridError::TruncatedData {
                expected: 100,
                available: 50
            })
        ));
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_bias_range() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("grid.pgrid");
        let source = AscSource::from_text(synthetic_asc(2, 2, 3, 4));

        let err = AscTranslator::default()
            .translate_source(&source, &output, &AcquisitionSettings::new(0.0))
            .unwrap_err();
        assert!(matches!(err, TranslateError::Axis(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_truncated_header() {
        let dir = tempdir().unwrap();
        let source = AscSource::from_text("# a = 1\n# b = 2\n");
        let err = AscTranslator::default()
            .translate_source(&source, dir.path().join("x.pgrid"), &AcquisitionSettings::new(1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::Header(HeaderError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::NotStarted < Stage::ParsedHeader);
        assert!(Stage::BuiltAxes < Stage::Written);
        assert_eq!(Stage::ParsedGrid.to_string(), "parsed grid");
    }
}
