/// Container format version - follows semantic versioning
pub const FORMAT_VERSION: &str = "1.0.0";

/// File extension for probegrid containers
pub const CONTAINER_EXTENSION: &str = "pgrid";

/// MIME type stored in the first (`mimetype`) entry of every container
pub const PROBEGRID_MIMETYPE: &str = "application/vnd.probegrid";

/// Name of the MIME type entry
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Name of the manifest entry
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// Name of the attribute document inside each group
pub const ATTRIBUTES_FILE: &str = "attributes.json";

/// Measurement group owned by the container root
pub const MEASUREMENT_GROUP: &str = "Measurement_000";

/// Channel group owned by the measurement group
pub const CHANNEL_GROUP: &str = "Channel_000";

/// Main dataset
pub const RAW_DATA: &str = "Raw_Data";

/// Ancillary dataset: linear index -> (col, row)
pub const POSITION_INDICES: &str = "Position_Indices";

/// Ancillary dataset: linear index -> (x, y)
pub const POSITION_VALUES: &str = "Position_Values";

/// Ancillary dataset: spectral index -> bin
pub const SPECTROSCOPIC_INDICES: &str = "Spectroscopic_Indices";

/// Ancillary dataset: spectral index -> sweep value
pub const SPECTROSCOPIC_VALUES: &str = "Spectroscopic_Values";

/// Ancillary datasets referenced by the main dataset, in reference order
pub const ANCILLARY_DATASETS: [&str; 4] = [
    POSITION_INDICES,
    POSITION_VALUES,
    SPECTROSCOPIC_INDICES,
    SPECTROSCOPIC_VALUES,
];

/// Every dataset of a channel: the main dataset first, then the ancillaries
pub const CHANNEL_DATASETS: [&str; 5] = [
    RAW_DATA,
    POSITION_INDICES,
    POSITION_VALUES,
    SPECTROSCOPIC_INDICES,
    SPECTROSCOPIC_VALUES,
];

/// Column of the main dataset holding one spectrum per row
pub const RAW_DATA_COLUMN: &str = "spectrum";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "probegrid:format_version";

/// Metadata key for the dataset name
pub const KEY_DATASET: &str = "probegrid:dataset";

/// Metadata key for the dataset shape, a JSON array `[rows, columns]`
pub const KEY_SHAPE: &str = "probegrid:shape";

/// Metadata key for the dimension labels, a JSON array
pub const KEY_LABELS: &str = "probegrid:labels";

/// Metadata key for the dimension units, a JSON array
pub const KEY_UNITS: &str = "probegrid:units";

/// Metadata key for the measured quantity (main dataset only)
pub const KEY_QUANTITY: &str = "probegrid:quantity";

/// Prefix of the reference keys on the main dataset
pub const REFERENCE_PREFIX: &str = "probegrid:ref:";

/// Path of a group inside the container, with trailing slash
pub fn channel_group_path() -> String {
    format!("{}/{}/", MEASUREMENT_GROUP, CHANNEL_GROUP)
}

/// Path of the attribute document of the measurement group
pub fn measurement_attributes_path() -> String {
    format!("{}/{}", MEASUREMENT_GROUP, ATTRIBUTES_FILE)
}

/// Path of the attribute document of the channel group
pub fn channel_attributes_path() -> String {
    format!("{}{}", channel_group_path(), ATTRIBUTES_FILE)
}

/// Entry path of a channel dataset, e.g.
/// `Measurement_000/Channel_000/Raw_Data.parquet`
pub fn dataset_path(name: &str) -> String {
    format!("{}{}.parquet", channel_group_path(), name)
}

/// Footer key holding the reference to ancillary dataset `name`
pub fn reference_key(name: &str) -> String {
    format!("{}{}", REFERENCE_PREFIX, name)
}
