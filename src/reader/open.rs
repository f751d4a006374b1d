use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;
use zip::ZipArchive;

use crate::schema::{
    channel_attributes_path, measurement_attributes_path, MANIFEST_ENTRY, MIMETYPE_ENTRY,
    PROBEGRID_MIMETYPE,
};

use super::{ContainerReader, ReaderConfig, ReaderError};

impl ContainerReader {
    /// Open a `.pgrid` container
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a container with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let mut entries = BTreeMap::new();
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            entries.insert(entry.name().to_string(), Bytes::from(bytes));
        }

        let mimetype = entries
            .get(MIMETYPE_ENTRY)
            .ok_or_else(|| ReaderError::MissingEntry(MIMETYPE_ENTRY.to_string()))?;
        if mimetype.as_ref() != PROBEGRID_MIMETYPE.as_bytes() {
            return Err(ReaderError::InvalidFormat(format!(
                "Unexpected mimetype: {}",
                String::from_utf8_lossy(mimetype)
            )));
        }

        let manifest = parse_json(&entries, MANIFEST_ENTRY)?;
        let measurement = parse_json(&entries, &measurement_attributes_path())?;
        let channel = parse_json(&entries, &channel_attributes_path())?;
        debug!("Opened {} ({} entries)", path.display(), entries.len());

        Ok(Self {
            path,
            config,
            manifest,
            measurement,
            channel,
            entries,
        })
    }
}

fn parse_json<T: DeserializeOwned>(
    entries: &BTreeMap<String, Bytes>,
    name: &str,
) -> Result<T, ReaderError> {
    let bytes = entries
        .get(name)
        .ok_or_else(|| ReaderError::MissingEntry(name.to_string()))?;
    Ok(serde_json::from_slice(bytes)?)
}
