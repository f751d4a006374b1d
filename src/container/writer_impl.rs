use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, FixedSizeListArray, Float32Array, Float64Array, UInt32Array};
use arrow::record_batch::RecordBatch;
use log::{debug, info, warn};
use parquet::arrow::ArrowWriter;
use parquet::schema::types::ColumnPath;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::axis::{AncillaryAxis, PositionAxis, SpectroscopicAxis};
use crate::grid::RawGrid;
use crate::header::ParameterMap;
use crate::schema::{
    channel_attributes_path, channel_group_path, create_indices_schema,
    create_raw_data_schema_arc, create_values_schema, dataset_path, measurement_attributes_path,
    reference_key, ChannelAttributes, Manifest, MeasurementAttributes, ANCILLARY_DATASETS,
    CHANNEL_GROUP, KEY_DATASET, KEY_LABELS, KEY_QUANTITY, KEY_SHAPE, KEY_UNITS, MANIFEST_ENTRY,
    MEASUREMENT_GROUP, MIMETYPE_ENTRY, POSITION_INDICES, POSITION_VALUES, PROBEGRID_MIMETYPE,
    RAW_DATA, RAW_DATA_COLUMN, SPECTROSCOPIC_INDICES, SPECTROSCOPIC_VALUES,
};

use super::config::ContainerConfig;
use super::error::ContainerError;
use super::request::TranslationRequest;
use super::stats::ContainerStats;

/// One encoded entry waiting to be added to the archive
struct EncodedEntry {
    path: String,
    bytes: Vec<u8>,
    method: CompressionMethod,
}

impl EncodedEntry {
    fn stored(path: String, bytes: Vec<u8>) -> Self {
        Self {
            path,
            bytes,
            method: CompressionMethod::Stored,
        }
    }

    fn deflated(path: String, bytes: Vec<u8>) -> Self {
        Self {
            path,
            bytes,
            method: CompressionMethod::Deflated,
        }
    }
}

/// Which half of an ancillary axis to encode
#[derive(Debug, Clone, Copy)]
enum AxisTable {
    Indices,
    Values,
}

/// Writes translated grids as `.pgrid` containers.
///
/// Every dataset is encoded in memory before the destination is touched, so
/// axis or dimension errors never leave a file behind. The destination is
/// created exclusively and the archive is finished and flushed before
/// [`ContainerWriter::write`] returns.
#[derive(Debug, Clone, Default)]
pub struct ContainerWriter {
    config: ContainerConfig,
}

impl ContainerWriter {
    /// Create a writer with the given configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// Writer configuration
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Write `request` to `destination` and return the container path
    pub fn translate<P: AsRef<Path>>(
        &self,
        destination: P,
        request: TranslationRequest,
    ) -> Result<PathBuf, ContainerError> {
        self.write(destination, request).map(|stats| stats.path)
    }

    /// Write `request` to `destination` and return write statistics
    pub fn write<P: AsRef<Path>>(
        &self,
        destination: P,
        request: TranslationRequest,
    ) -> Result<ContainerStats, ContainerError> {
        let destination = destination.as_ref();
        let TranslationRequest {
            raw_grid,
            num_rows,
            num_cols,
            quantity_name,
            data_unit,
            spec_name,
            spec_unit,
            spec_values,
            scan_height,
            scan_width,
            spatial_unit,
            data_type,
            translator_name,
            parameters,
            source_file,
        } = request;

        let num_positions = raw_grid.num_positions();
        let spectral_length = raw_grid.spectral_length();

        let positions = PositionAxis::build(num_rows, num_cols, scan_width, scan_height, &spatial_unit)?;
        let spectroscopic = SpectroscopicAxis::from_values(&spec_name, &spec_unit, spec_values)?;
        debug!(
            "Built axes: {} positions ({} x {}), {} spectroscopic points",
            positions.len(),
            num_rows,
            num_cols,
            spectroscopic.len()
        );

        let mut datasets = Vec::with_capacity(5);
        datasets.push(EncodedEntry::stored(
            dataset_path(RAW_DATA),
            self.encode_raw_data(raw_grid, &quantity_name, &data_unit)?,
        ));
        for (name, axis, table) in [
            (POSITION_INDICES, &positions as &dyn AncillaryAxis, AxisTable::Indices),
            (POSITION_VALUES, &positions as &dyn AncillaryAxis, AxisTable::Values),
            (SPECTROSCOPIC_INDICES, &spectroscopic as &dyn AncillaryAxis, AxisTable::Indices),
            (SPECTROSCOPIC_VALUES, &spectroscopic as &dyn AncillaryAxis, AxisTable::Values),
        ] {
            datasets.push(EncodedEntry::stored(
                dataset_path(name),
                self.encode_axis(name, axis, table)?,
            ));
        }

        let parameters_written = parameters.len();
        let measurement = MeasurementAttributes {
            data_type: data_type.clone(),
            translator: translator_name.clone(),
            channels: vec![CHANNEL_GROUP.to_string()],
        };
        let channel = ChannelAttributes {
            quantity: quantity_name,
            data_unit,
            spatial_unit,
            data_type,
            translator: translator_name,
            num_rows: num_rows as u64,
            num_cols: num_cols as u64,
            spectral_length: spectral_length as u64,
            scan_width,
            scan_height,
            spec_name,
            spec_unit,
            parameters,
        };

        let mut entries = vec![
            EncodedEntry::deflated(
                measurement_attributes_path(),
                serde_json::to_vec_pretty(&measurement)?,
            ),
            EncodedEntry::deflated(channel_attributes_path(), serde_json::to_vec_pretty(&channel)?),
        ];
        entries.extend(datasets);

        let mut manifest = Manifest::new(
            num_positions as u64,
            spectral_length as u64,
            Manifest::default_converter(),
        )
        .with_source_file(source_file);
        manifest.entries = [MIMETYPE_ENTRY.to_string(), MANIFEST_ENTRY.to_string()]
            .into_iter()
            .chain(entries.iter().map(|e| e.path.clone()))
            .collect();
        let manifest_json = serde_json::to_vec_pretty(&manifest)?;

        let file = self.open_destination(destination)?;
        self.write_archive(file, &manifest_json, &entries)?;

        let total_size_bytes = fs::metadata(destination)?.len();
        info!(
            "Wrote {} ({} x {} grid, {} bytes)",
            destination.display(),
            num_positions,
            spectral_length,
            total_size_bytes
        );

        Ok(ContainerStats {
            path: destination.to_path_buf(),
            num_positions,
            spectral_length,
            parameters_written,
            dataset_sizes: entries
                .iter()
                .filter(|e| e.method == CompressionMethod::Stored)
                .map(|e| (e.path.clone(), e.bytes.len() as u64))
                .collect(),
            total_size_bytes,
        })
    }

    /// Encode the main dataset, consuming the grid
    fn encode_raw_data(
        &self,
        raw_grid: RawGrid,
        quantity_name: &str,
        data_unit: &str,
    ) -> Result<Vec<u8>, ContainerError> {
        let (num_positions, spectral_length) = raw_grid.shape();
        let list_size = i32::try_from(spectral_length).map_err(|_| ContainerError::DimensionMismatch {
            what: "spectral_length",
            expected: i32::MAX as usize,
            actual: spectral_length,
        })?;

        let schema = create_raw_data_schema_arc(list_size, data_unit);
        let values: ArrayRef = Arc::new(Float32Array::from(raw_grid.into_values()));
        let spectra = FixedSizeListArray::try_new(
            crate::schema::raw_data_item_field(),
            list_size,
            values,
            None,
        )?;
        let batch = RecordBatch::try_new(schema, vec![Arc::new(spectra) as ArrayRef])?;

        let mut metadata = dataset_metadata(
            RAW_DATA,
            [num_positions, spectral_length],
            &[quantity_name],
            &[data_unit],
        )?;
        metadata.insert(KEY_QUANTITY.to_string(), quantity_name.to_string());
        for name in ANCILLARY_DATASETS {
            metadata.insert(reference_key(name), dataset_path(name));
        }

        let float_columns = [ColumnPath::new(vec![
            RAW_DATA_COLUMN.to_string(),
            "list".to_string(),
            "item".to_string(),
        ])];
        let bytes = self.encode_batch(&batch, &float_columns, &metadata)?;
        debug!("Encoded {}: {} bytes", RAW_DATA, bytes.len());
        Ok(bytes)
    }

    /// Encode the index or value table of an ancillary axis
    fn encode_axis(
        &self,
        name: &str,
        axis: &dyn AncillaryAxis,
        table: AxisTable,
    ) -> Result<Vec<u8>, ContainerError> {
        let dimensions = axis.dimensions();
        let labels: Vec<&str> = dimensions.iter().map(|d| d.label).collect();
        let units: Vec<&str> = dimensions.iter().map(|d| d.unit).collect();

        let (schema, columns, float_columns): (_, Vec<ArrayRef>, Vec<ColumnPath>) = match table {
            AxisTable::Indices => (
                create_indices_schema(&labels, &units),
                dimensions
                    .iter()
                    .map(|d| Arc::new(UInt32Array::from(d.indices.clone())) as ArrayRef)
                    .collect(),
                Vec::new(),
            ),
            AxisTable::Values => (
                create_values_schema(&labels, &units),
                dimensions
                    .iter()
                    .map(|d| Arc::new(Float64Array::from(d.values.to_vec())) as ArrayRef)
                    .collect(),
                labels
                    .iter()
                    .map(|label| ColumnPath::new(vec![label.to_string()]))
                    .collect(),
            ),
        };
        let batch = RecordBatch::try_new(Arc::new(schema), columns)?;
        let metadata = dataset_metadata(name, [axis.len(), labels.len()], &labels, &units)?;

        let bytes = self.encode_batch(&batch, &float_columns, &metadata)?;
        debug!("Encoded {}: {} rows, {} bytes", name, axis.len(), bytes.len());
        Ok(bytes)
    }

    fn encode_batch(
        &self,
        batch: &RecordBatch,
        float_columns: &[ColumnPath],
        metadata: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>, ContainerError> {
        let props = self.config.to_writer_properties(float_columns, metadata)?;
        let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), Some(props))?;
        writer.write(batch)?;
        Ok(writer.into_inner()?)
    }

    /// Open the destination for exclusive write, honoring the overwrite flag
    fn open_destination(&self, path: &Path) -> Result<File, ContainerError> {
        if path.as_os_str().is_empty() {
            return Err(ContainerError::IncompatibleDestination {
                path: path.to_path_buf(),
                reason: "empty path".to_string(),
            });
        }
        if path.is_dir() {
            return Err(ContainerError::IncompatibleDestination {
                path: path.to_path_buf(),
                reason: "destination is a directory".to_string(),
            });
        }

        if path.exists() {
            if !self.config.overwrite {
                return Err(ContainerError::DestinationConflict(path.to_path_buf()));
            }
            if !is_probegrid_container(path) {
                return Err(ContainerError::IncompatibleDestination {
                    path: path.to_path_buf(),
                    reason: "existing file is not a probegrid container".to_string(),
                });
            }
            warn!("Overwriting existing container {}", path.display());
            fs::remove_file(path)?;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    ContainerError::DestinationConflict(path.to_path_buf())
                } else {
                    e.into()
                }
            })
    }

    fn write_archive(
        &self,
        file: File,
        manifest_json: &[u8],
        entries: &[EncodedEntry],
    ) -> Result<(), ContainerError> {
        let mut zip_writer = ZipWriter::new(BufWriter::new(file));

        // mimetype MUST be the first entry and uncompressed
        zip_writer.start_file(MIMETYPE_ENTRY, entry_options(CompressionMethod::Stored))?;
        zip_writer.write_all(PROBEGRID_MIMETYPE.as_bytes())?;

        zip_writer.start_file(MANIFEST_ENTRY, entry_options(CompressionMethod::Deflated))?;
        zip_writer.write_all(manifest_json)?;

        zip_writer.add_directory(
            format!("{}/", MEASUREMENT_GROUP),
            entry_options(CompressionMethod::Stored),
        )?;
        zip_writer.add_directory(channel_group_path(), entry_options(CompressionMethod::Stored))?;

        for entry in entries {
            zip_writer.start_file(entry.path.as_str(), entry_options(entry.method))?;
            zip_writer.write_all(&entry.bytes)?;
        }

        let inner = zip_writer.finish()?;
        let file = inner.into_inner().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to flush ZIP buffer: {}", e.error()),
            )
        })?;
        file.sync_all()?;
        Ok(())
    }
}

fn entry_options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(method)
        .unix_permissions(0o644)
}

/// Footer metadata shared by every dataset
fn dataset_metadata(
    name: &str,
    shape: [usize; 2],
    labels: &[&str],
    units: &[&str],
) -> Result<BTreeMap<String, String>, ContainerError> {
    let mut metadata = BTreeMap::new();
    metadata.insert(KEY_DATASET.to_string(), name.to_string());
    metadata.insert(KEY_SHAPE.to_string(), serde_json::to_string(&shape)?);
    metadata.insert(KEY_LABELS.to_string(), serde_json::to_string(labels)?);
    metadata.insert(KEY_UNITS.to_string(), serde_json::to_string(units)?);
    Ok(metadata)
}

/// Whether `path` is a ZIP archive whose first entry is the probegrid mimetype
fn is_probegrid_container(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(mut archive) = ZipArchive::new(BufReader::new(file)) else {
        return false;
    };
    let Ok(mut entry) = archive.by_index(0) else {
        return false;
    };
    if entry.name() != MIMETYPE_ENTRY {
        return false;
    }
    let mut content = String::new();
    entry.read_to_string(&mut content).is_ok() && content == PROBEGRID_MIMETYPE
}

/// Translate a grid into a container at `destination` with the default
/// [`ContainerConfig`].
///
/// This is the flat form of [`ContainerWriter::translate`]; it builds the
/// [`TranslationRequest`] from its arguments and returns the container path.
#[allow(clippy::too_many_arguments)]
pub fn translate<P: AsRef<Path>>(
    destination: P,
    raw_grid: RawGrid,
    num_rows: usize,
    num_cols: usize,
    quantity_name: &str,
    data_unit: &str,
    spec_name: &str,
    spec_unit: &str,
    spec_values: Vec<f64>,
    scan_height: f64,
    scan_width: f64,
    spatial_unit: &str,
    data_type: &str,
    translator_name: &str,
    parameters: ParameterMap,
) -> Result<PathBuf, ContainerError> {
    let request = TranslationRequest::builder(raw_grid, num_rows, num_cols)
        .quantity(quantity_name, data_unit)
        .spectroscopic(spec_name, spec_unit, spec_values)
        .scan_size(scan_width, scan_height, spatial_unit)
        .data_type(data_type)
        .translator_name(translator_name)
        .parameters(parameters)
        .build()?;
    ContainerWriter::default().translate(destination, request)
}
