use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::datatypes::Schema;
use bytes::Bytes;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::schema::{
    dataset_path, KEY_DATASET, KEY_FORMAT_VERSION, KEY_LABELS, KEY_SHAPE, KEY_UNITS,
};

use super::{ContainerReader, ReaderError};

/// Footer metadata of one dataset
#[derive(Debug, Clone)]
pub struct DatasetMetadata {
    /// Dataset name recorded in the footer
    pub name: String,
    /// Format version string
    pub format_version: String,
    /// Total number of rows
    pub total_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Arrow schema of the dataset
    pub schema: Arc<Schema>,
    /// Declared `[rows, columns]` shape
    pub shape: [u64; 2],
    /// Dimension labels
    pub labels: Vec<String>,
    /// Dimension units
    pub units: Vec<String>,
    /// Raw key-value metadata from the Parquet footer
    pub key_value_metadata: BTreeMap<String, String>,
}

impl DatasetMetadata {
    /// Extract metadata from encoded Parquet bytes
    pub fn from_bytes(bytes: &Bytes) -> Result<Self, ReaderError> {
        let reader = SerializedFileReader::new(bytes.clone())?;
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = BTreeMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let required = |key: &str| {
            kv_metadata
                .get(key)
                .ok_or_else(|| ReaderError::InvalidFormat(format!("Missing footer key {}", key)))
        };
        let name = required(KEY_DATASET)?.clone();
        let shape: [u64; 2] = serde_json::from_str(required(KEY_SHAPE)?)?;
        let labels: Vec<String> = serde_json::from_str(required(KEY_LABELS)?)?;
        let units: Vec<String> = serde_json::from_str(required(KEY_UNITS)?)?;

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(Self {
            name,
            format_version,
            total_rows,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            shape,
            labels,
            units,
            key_value_metadata: kv_metadata,
        })
    }
}

impl ContainerReader {
    /// Raw Parquet bytes of channel dataset `name` (e.g. `"Raw_Data"`)
    pub fn dataset_bytes(&self, name: &str) -> Result<Bytes, ReaderError> {
        self.entry_bytes(&dataset_path(name))
    }

    /// Bytes of any archive entry by full path
    pub fn entry_bytes(&self, path: &str) -> Result<Bytes, ReaderError> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| ReaderError::MissingEntry(path.to_string()))
    }

    /// Footer metadata of channel dataset `name`
    pub fn dataset_metadata(&self, name: &str) -> Result<DatasetMetadata, ReaderError> {
        DatasetMetadata::from_bytes(&self.dataset_bytes(name)?)
    }
}
