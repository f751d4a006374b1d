use std::collections::BTreeMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::errors::ParquetError;
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

/// Lowest accepted ZSTD level
pub const ZSTD_MIN_LEVEL: i32 = 1;

/// Highest accepted ZSTD level
pub const ZSTD_MAX_LEVEL: i32 = 22;

/// Compression options for the Parquet datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }

    /// ZSTD at `level`, clamped to `ZSTD_MIN_LEVEL..=ZSTD_MAX_LEVEL`
    pub fn zstd_clamped(level: i32) -> Self {
        Self::Zstd(level.clamp(ZSTD_MIN_LEVEL, ZSTD_MAX_LEVEL))
    }

    /// Out-of-range ZSTD levels are an error, never a silent default
    fn to_parquet(self) -> Result<Compression, ParquetError> {
        Ok(match self {
            CompressionType::Zstd(level) => Compression::ZSTD(ZstdLevel::try_new(level)?),
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        })
    }
}

/// Configuration for the container writer
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Compression of every Parquet dataset
    pub compression: CompressionType,

    /// Target row group size (number of rows per group)
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,

    /// Enable BYTE_STREAM_SPLIT encoding for floating-point columns
    pub use_byte_stream_split: bool,

    /// Replace an existing container at the destination instead of failing
    pub overwrite: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 65_536,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
            overwrite: false,
        }
    }
}

impl ContainerConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            row_group_size: 262_144,
            data_page_size: 2 * 1024 * 1024,
            ..Self::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::fast(),
            data_page_size: 512 * 1024,
            ..Self::default()
        }
    }

    /// Same configuration, permitting an existing destination to be replaced
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Create writer properties for one dataset.
    ///
    /// `float_columns` are the leaf column paths holding floating-point
    /// values; they skip dictionary encoding. `metadata` becomes the footer
    /// key-value metadata, written in key order.
    pub(super) fn to_writer_properties(
        &self,
        float_columns: &[ColumnPath],
        metadata: &BTreeMap<String, String>,
    ) -> Result<WriterProperties, ParquetError> {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        for column in float_columns {
            builder = builder.set_column_dictionary_enabled(column.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(column.clone(), Encoding::BYTE_STREAM_SPLIT);
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(ContainerConfig::default().compression, CompressionType::Zstd(3));
        assert_eq!(
            ContainerConfig::max_compression().compression,
            CompressionType::Zstd(22)
        );
        assert_eq!(ContainerConfig::fast_write().compression, CompressionType::Snappy);
        assert!(!ContainerConfig::default().overwrite);
        assert!(ContainerConfig::default().with_overwrite(true).overwrite);
    }

    #[test]
    fn test_writer_properties_metadata_in_key_order() {
        let mut metadata = BTreeMap::new();
        metadata.insert("b".to_string(), "2".to_string());
        metadata.insert("a".to_string(), "1".to_string());

        let props = ContainerConfig::default()
            .to_writer_properties(&[], &metadata)
            .unwrap();
        let keys: Vec<&str> = props
            .key_value_metadata()
            .unwrap()
            .iter()
            .map(|kv| kv.key.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_float_columns_skip_dictionary() {
        let column = ColumnPath::new(vec!["X".to_string()]);
        let props = ContainerConfig::default()
            .to_writer_properties(std::slice::from_ref(&column), &BTreeMap::new())
            .unwrap();
        assert!(!props.dictionary_enabled(&column));
        assert_eq!(props.encoding(&column), Some(Encoding::BYTE_STREAM_SPLIT));
    }

    #[test]
    fn test_zstd_level_out_of_range() {
        assert_eq!(CompressionType::zstd_clamped(40), CompressionType::Zstd(22));
        assert_eq!(CompressionType::zstd_clamped(-5), CompressionType::Zstd(1));
        assert_eq!(CompressionType::zstd_clamped(9), CompressionType::Zstd(9));

        let config = ContainerConfig {
            compression: CompressionType::Zstd(40),
            ..ContainerConfig::default()
        };
        assert!(config.to_writer_properties(&[], &BTreeMap::new()).is_err());
    }
}
