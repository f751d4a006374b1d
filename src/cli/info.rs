use anyhow::{Context, Result};
use std::path::PathBuf;

use probegrid::reader::ContainerReader;
use probegrid::schema::CHANNEL_DATASETS;

/// Display information about a .pgrid container
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = ContainerReader::open(&file).context("Failed to open container")?;
    let summary = reader.summary().context("Failed to read container")?;

    println!("probegrid Container Information");
    println!("===============================");
    println!("File: {}", file.display());
    println!();
    println!("{}", summary);
    println!();

    println!("Datasets:");
    for name in CHANNEL_DATASETS {
        let metadata = reader
            .dataset_metadata(name)
            .with_context(|| format!("Failed to read {} metadata", name))?;
        println!(
            "  {:<24} {:>8} x {:<6} {:?} [{}]",
            name,
            metadata.shape[0],
            metadata.shape[1],
            metadata.labels,
            metadata.units.join(", ")
        );
    }
    println!();

    let parameters = &reader.channel().parameters;
    if !parameters.is_empty() {
        println!("Header Parameters:");
        for (key, value) in parameters.iter() {
            println!("  {}: {}", key, value);
        }
    }

    Ok(())
}
