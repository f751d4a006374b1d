use std::fmt;

use crate::schema::SourceFileInfo;

use super::{ContainerReader, ReaderError};

/// Summary of a container
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    /// Format version
    pub format_version: String,
    /// Container identifier
    pub id: String,
    /// Creation timestamp
    pub created: String,
    /// Converter that wrote the container
    pub converter: String,
    /// Translated source file, if recorded
    pub source_file: Option<SourceFileInfo>,
    /// Measured quantity and unit
    pub quantity: (String, String),
    /// Raster rows
    pub num_rows: u64,
    /// Raster columns
    pub num_cols: u64,
    /// Values per spectrum
    pub spectral_length: u64,
    /// Scan extents (width, height) and unit
    pub scan_size: (f64, f64, String),
    /// Spectroscopic dimension name, unit and value range
    pub spectroscopic: (String, String, Option<(f64, f64)>),
    /// Range of the measured values
    pub data_range: Option<(f32, f32)>,
    /// Number of header parameters
    pub num_parameters: usize,
}

impl ContainerReader {
    /// Get summary statistics about the container
    pub fn summary(&self) -> Result<ContainerSummary, ReaderError> {
        let grid = self.raw_data()?;
        let data_range = if grid.as_slice().is_empty() {
            None
        } else {
            let min = grid.as_slice().iter().copied().fold(f32::MAX, f32::min);
            let max = grid.as_slice().iter().copied().fold(f32::MIN, f32::max);
            Some((min, max))
        };

        let spectroscopic = self.spectroscopic_values()?;
        let spec_range = spectroscopic
            .columns
            .first()
            .and_then(|values| Some((*values.first()?, *values.last()?)));

        let channel = &self.channel;
        Ok(ContainerSummary {
            format_version: self.manifest.format_version.clone(),
            id: self.manifest.id.to_string(),
            created: self.manifest.created.clone(),
            converter: self.manifest.converter.clone(),
            source_file: self.manifest.source_file.clone(),
            quantity: (channel.quantity.clone(), channel.data_unit.clone()),
            num_rows: channel.num_rows,
            num_cols: channel.num_cols,
            spectral_length: channel.spectral_length,
            scan_size: (
                channel.scan_width,
                channel.scan_height,
                channel.spatial_unit.clone(),
            ),
            spectroscopic: (
                channel.spec_name.clone(),
                channel.spec_unit.clone(),
                spec_range,
            ),
            data_range,
            num_parameters: channel.parameters.len(),
        })
    }
}

impl fmt::Display for ContainerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Container id:   {}", self.id)?;
        writeln!(f, "Created:        {}", self.created)?;
        writeln!(f, "Converter:      {}", self.converter)?;
        if let Some(source) = &self.source_file {
            match source.size_bytes {
                Some(size) => writeln!(f, "Source:         {} ({} bytes)", source.name, size)?,
                None => writeln!(f, "Source:         {}", source.name)?,
            }
        }
        writeln!(
            f,
            "Grid:           {} x {} positions, {} points each",
            self.num_rows, self.num_cols, self.spectral_length
        )?;
        writeln!(
            f,
            "Scan size:      {} x {} {}",
            self.scan_size.0, self.scan_size.1, self.scan_size.2
        )?;
        let (name, unit, range) = &self.spectroscopic;
        let label = format!("{}:", name);
        match range {
            Some((first, last)) => writeln!(f, "{:<16}{} to {} {}", label, first, last, unit)?,
            None => writeln!(f, "{:<16}(empty)", label)?,
        }
        let label = format!("{}:", self.quantity.0);
        match self.data_range {
            Some((min, max)) => {
                writeln!(f, "{:<16}{} to {} {}", label, min, max, self.quantity.1)?
            }
            None => writeln!(f, "{:<16}(empty)", label)?,
        }
        write!(f, "Parameters:     {}", self.num_parameters)
    }
}
