use std::fmt;
use std::path::PathBuf;

/// Statistics from a completed container write
#[derive(Debug, Clone)]
pub struct ContainerStats {
    /// Path of the written container
    pub path: PathBuf,

    /// Rows of the main dataset
    pub num_positions: usize,

    /// Values per spectrum
    pub spectral_length: usize,

    /// Header parameters attached to the channel
    pub parameters_written: usize,

    /// Encoded size of each dataset, in container order
    pub dataset_sizes: Vec<(String, u64)>,

    /// Total container size in bytes
    pub total_size_bytes: u64,
}

impl fmt::Display for ContainerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Container: {} positions x {} points, {} parameters, {} bytes",
            self.num_positions, self.spectral_length, self.parameters_written, self.total_size_bytes
        )
    }
}
