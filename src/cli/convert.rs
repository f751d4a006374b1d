use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};

use probegrid::container::{
    CompressionType, ContainerConfig, ContainerWriter, ZSTD_MAX_LEVEL, ZSTD_MIN_LEVEL,
};
use probegrid::pipeline::{AcquisitionSettings, AscTranslator};
use probegrid::schema::CONTAINER_EXTENSION;

use super::config::Config;

/// Writer profile trading speed against compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower conversion
    MaxCompression,
}

impl From<ProfileArg> for ContainerConfig {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Fast => ContainerConfig::fast_write(),
            ProfileArg::Balanced => ContainerConfig::default(),
            ProfileArg::MaxCompression => ContainerConfig::max_compression(),
        }
    }
}

/// Arguments of the `convert` subcommand
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input .asc file path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output container path (defaults to INPUT with a .pgrid extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Bias sweep amplitude; the sweep runs from -MAX_V to +MAX_V
    #[arg(long, value_name = "MAX_V", allow_negative_numbers = true)]
    pub max_v: Option<f64>,

    /// Physical scan width
    #[arg(long)]
    pub scan_width: Option<f64>,

    /// Physical scan height
    #[arg(long)]
    pub scan_height: Option<f64>,

    /// Unit of the scan extents
    #[arg(long)]
    pub spatial_unit: Option<String>,

    /// Measured quantity name
    #[arg(long)]
    pub quantity: Option<String>,

    /// Unit of the measured quantity
    #[arg(long)]
    pub data_unit: Option<String>,

    /// Replace an existing container at OUTPUT
    #[arg(long)]
    pub overwrite: bool,

    /// Validate the container after writing it
    #[arg(long)]
    pub verify: bool,

    /// Writer profile (fast, balanced, max-compression)
    #[arg(short = 'p', long, default_value = "balanced", value_enum)]
    pub profile: ProfileArg,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compression level for ZSTD (1-22, default: profile-dependent)
    #[arg(short = 'c', long, hide = true)]
    pub compression_level: Option<i32>,
}

/// Output path used when none is given
fn default_output(input: &Path) -> PathBuf {
    input.with_extension(CONTAINER_EXTENSION)
}

/// Merge flags over config-file values
fn resolve(args: &ConvertArgs, config: &Config) -> Result<(AcquisitionSettings, ContainerConfig)> {
    let axes = &config.axes;
    let Some(max_v) = args.max_v.or(axes.max_v) else {
        anyhow::bail!("The bias sweep amplitude is required: pass --max-v or set max_v under [axes]");
    };

    let mut settings = AcquisitionSettings::new(max_v);
    if let Some(width) = args.scan_width.or(axes.scan_width) {
        settings.scan_width = width;
    }
    if let Some(height) = args.scan_height.or(axes.scan_height) {
        settings.scan_height = height;
    }
    if let Some(unit) = args.spatial_unit.clone().or_else(|| axes.spatial_unit.clone()) {
        settings.spatial_unit = unit;
    }
    if let Some(quantity) = args.quantity.clone().or_else(|| axes.quantity.clone()) {
        settings.quantity = quantity;
    }
    if let Some(unit) = args.data_unit.clone().or_else(|| axes.data_unit.clone()) {
        settings.data_unit = unit;
    }

    let mut container = ContainerConfig::from(args.profile);
    if let Some(level) = args.compression_level.or(config.container.compression_level) {
        let compression = CompressionType::zstd_clamped(level);
        if compression != CompressionType::Zstd(level) {
            warn!(
                "Compression level {} is outside {}..={}, using {:?}",
                level, ZSTD_MIN_LEVEL, ZSTD_MAX_LEVEL, compression
            );
        }
        container.compression = compression;
    }
    if let Some(row_group_size) = config.container.row_group_size {
        container.row_group_size = row_group_size;
    }
    let overwrite = args.overwrite || config.container.overwrite.unwrap_or(false);

    Ok((settings, container.with_overwrite(overwrite)))
}

/// Convert an .asc file to a .pgrid container
pub fn run(args: ConvertArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let (settings, container) = resolve(&args, &config)?;
    let output = args.output.clone().unwrap_or_else(|| default_output(&args.input));

    info!("probegrid - ASC to container");
    info!("============================");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", output.display());
    info!("Sweep:  -{0} to {0} {1}", settings.max_v, settings.spec_unit);
    info!(
        "Scan:   {} x {} {}",
        settings.scan_width, settings.scan_height, settings.spatial_unit
    );

    let translator = AscTranslator::new(config.layout, ContainerWriter::new(container))
        .with_verification(args.verify);
    let summary = translator
        .translate_file(&args.input, &output, &settings)
        .with_context(|| format!("Conversion of {} failed", args.input.display()))?;

    info!("Conversion complete!");
    for (name, size) in &summary.stats.dataset_sizes {
        info!("  {}: {} bytes", name, size);
    }
    println!("{}", summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(max_v: Option<f64>) -> ConvertArgs {
        ConvertArgs {
            input: PathBuf::from("scan.asc"),
            output: None,
            max_v,
            scan_width: None,
            scan_height: Some(40.0),
            spatial_unit: None,
            quantity: None,
            data_unit: None,
            overwrite: false,
            verify: false,
            profile: ProfileArg::Balanced,
            config: None,
            compression_level: None,
        }
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/scan.asc")),
            PathBuf::from("data/scan.pgrid")
        );
    }

    #[test]
    fn test_max_v_required() {
        let err = resolve(&args(None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--max-v"));
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_str(
            r#"
            [axes]
            max_v = 3.0
            scan_width = 10.0
            scan_height = 20.0

            [container]
            compression_level = 9
            overwrite = true
            "#,
        )
        .unwrap();

        let (settings, container) = resolve(&args(Some(1.0)), &config).unwrap();
        assert_eq!(settings.max_v, 1.0);
        assert_eq!(settings.scan_width, 10.0);
        assert_eq!(settings.scan_height, 40.0);
        assert_eq!(container.compression, CompressionType::Zstd(9));
        assert!(container.overwrite);

        let (settings, _) = resolve(&args(None), &config).unwrap();
        assert_eq!(settings.max_v, 3.0);
    }

    #[test]
    fn test_compression_level_clamped() {
        let mut high = args(Some(1.0));
        high.compression_level = Some(99);
        let (_, container) = resolve(&high, &Config::default()).unwrap();
        assert_eq!(container.compression, CompressionType::Zstd(ZSTD_MAX_LEVEL));

        let config = Config::from_str("[container]\ncompression_level = 0\n").unwrap();
        let (_, container) = resolve(&args(Some(1.0)), &config).unwrap();
        assert_eq!(container.compression, CompressionType::Zstd(ZSTD_MIN_LEVEL));
    }
}
