use std::collections::BTreeMap;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::grid::RawGrid;
use crate::schema::{
    POSITION_INDICES, POSITION_VALUES, RAW_DATA, RAW_DATA_COLUMN, REFERENCE_PREFIX,
    SPECTROSCOPIC_INDICES, SPECTROSCOPIC_VALUES,
};

use super::utils::{get_float64_column, get_spectrum_column, get_uint32_column};
use super::{ContainerReader, ReaderError};

/// Columns of an ancillary dataset, one per dimension label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisColumns<T> {
    /// Dimension labels, in column order
    pub labels: Vec<String>,
    /// Dimension units, in column order
    pub units: Vec<String>,
    /// Column data, parallel to `labels`
    pub columns: Vec<Vec<T>>,
}

impl<T> AxisColumns<T> {
    /// Column by label
    pub fn column(&self, label: &str) -> Option<&[T]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.columns[i].as_slice())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContainerReader {
    /// Decode every record batch of dataset `name`
    pub fn read_batches(&self, name: &str) -> Result<Vec<RecordBatch>, ReaderError> {
        let reader = ParquetRecordBatchReaderBuilder::try_new(self.dataset_bytes(name)?)?
            .with_batch_size(self.config.batch_size)
            .build()?;
        reader
            .map(|batch| batch.map_err(ReaderError::from))
            .collect()
    }

    /// The main dataset as a [`RawGrid`]
    pub fn raw_data(&self) -> Result<RawGrid, ReaderError> {
        let expected_length = self.channel.spectral_length as usize;
        let mut values = Vec::new();
        let mut num_positions = 0;

        for batch in self.read_batches(RAW_DATA)? {
            let (list, items) = get_spectrum_column(&batch, RAW_DATA_COLUMN)?;
            if list.value_length() as usize != expected_length {
                return Err(ReaderError::InvalidFormat(format!(
                    "{} spectra have {} points, channel declares {}",
                    RAW_DATA,
                    list.value_length(),
                    expected_length
                )));
            }
            if items.null_count() > 0 {
                return Err(ReaderError::InvalidFormat(format!(
                    "{} contains null values",
                    RAW_DATA
                )));
            }
            values.extend_from_slice(items.values());
            num_positions += list.len();
        }

        RawGrid::from_vec(num_positions, expected_length, values)
            .map_err(|e| ReaderError::InvalidFormat(e.to_string()))
    }

    /// Reference attributes of the main dataset: ancillary name -> entry path
    pub fn references(&self) -> Result<BTreeMap<String, String>, ReaderError> {
        let metadata = self.dataset_metadata(RAW_DATA)?;
        Ok(metadata
            .key_value_metadata
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(REFERENCE_PREFIX)
                    .map(|name| (name.to_string(), value))
            })
            .collect())
    }

    /// Position indices: columns `X` (col) and `Y` (row)
    pub fn position_indices(&self) -> Result<AxisColumns<u32>, ReaderError> {
        self.read_indices(POSITION_INDICES)
    }

    /// Position values: columns `X` and `Y`
    pub fn position_values(&self) -> Result<AxisColumns<f64>, ReaderError> {
        self.read_values(POSITION_VALUES)
    }

    /// Spectroscopic indices
    pub fn spectroscopic_indices(&self) -> Result<AxisColumns<u32>, ReaderError> {
        self.read_indices(SPECTROSCOPIC_INDICES)
    }

    /// Spectroscopic values
    pub fn spectroscopic_values(&self) -> Result<AxisColumns<f64>, ReaderError> {
        self.read_values(SPECTROSCOPIC_VALUES)
    }

    fn read_indices(&self, name: &str) -> Result<AxisColumns<u32>, ReaderError> {
        self.read_axis(name, |batch, label, out: &mut Vec<u32>| {
            out.extend(get_uint32_column(batch, label)?.values().iter().copied());
            Ok(())
        })
    }

    fn read_values(&self, name: &str) -> Result<AxisColumns<f64>, ReaderError> {
        self.read_axis(name, |batch, label, out: &mut Vec<f64>| {
            out.extend(get_float64_column(batch, label)?.values().iter().copied());
            Ok(())
        })
    }

    fn read_axis<T, F>(&self, name: &str, mut append: F) -> Result<AxisColumns<T>, ReaderError>
    where
        F: FnMut(&RecordBatch, &str, &mut Vec<T>) -> Result<(), ReaderError>,
    {
        let metadata = self.dataset_metadata(name)?;
        let mut columns: Vec<Vec<T>> = metadata.labels.iter().map(|_| Vec::new()).collect();

        for batch in self.read_batches(name)? {
            for (label, column) in metadata.labels.iter().zip(columns.iter_mut()) {
                append(&batch, label, column)?;
            }
        }

        Ok(AxisColumns {
            labels: metadata.labels,
            units: metadata.units,
            columns,
        })
    }
}
