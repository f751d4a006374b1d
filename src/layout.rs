//! # Source Layout
//!
//! Omicron `.asc` spectroscopy dumps have a fixed, known layout:
//!
//! ```text
//! line   1-3    free-form preamble
//! line   4-17   parameter block, one `# key = value` per line
//! line  18-403  remainder of the header (ignored)
//! line 404-     one tab-delimited spectrum per scan position
//! ```
//!
//! [`AscLayout`] names those constants so the pipeline stages can be driven
//! and tested independently. It is not a format-detection mechanism.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// First zero-based line of the parameter block in an Omicron `.asc` file
pub const OMICRON_PARAMETER_START: usize = 3;

/// Zero-based line one past the end of the parameter block
pub const OMICRON_PARAMETER_END: usize = 17;

/// Number of lines preceding the first data row
pub const OMICRON_HEADER_LENGTH: usize = 403;

/// Comment marker prefixing every parameter line
pub const DEFAULT_COMMENT_MARKER: &str = "#";

/// How the header parser treats a key that appears twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// Fail with the line numbers of both occurrences
    #[default]
    Reject,
    /// Keep the value from the later line
    LastWriteWins,
}

/// Fixed line layout of an `.asc` source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscLayout {
    /// Zero-based first line of the parameter block
    pub parameter_start: usize,

    /// Zero-based line one past the last parameter line
    pub parameter_end: usize,

    /// Number of header lines before the data block
    pub header_length: usize,

    /// Marker stripped from the start of each parameter line
    pub comment_marker: String,

    /// Duplicate parameter key handling
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl Default for AscLayout {
    fn default() -> Self {
        Self::omicron()
    }
}

impl AscLayout {
    /// Layout of the Omicron STM spectroscopy export
    pub fn omicron() -> Self {
        Self {
            parameter_start: OMICRON_PARAMETER_START,
            parameter_end: OMICRON_PARAMETER_END,
            header_length: OMICRON_HEADER_LENGTH,
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            duplicate_keys: DuplicateKeyPolicy::Reject,
        }
    }

    /// Zero-based line range holding the parameter block
    pub fn parameter_lines(&self) -> Range<usize> {
        self.parameter_start..self.parameter_end
    }
}

/// An `.asc` file held entirely in memory.
///
/// The whole file is read before parsing begins. Source files are expected to
/// be small relative to available memory (tens to low hundreds of megabytes);
/// larger inputs are outside the supported scale, not a streaming use case.
#[derive(Debug, Clone)]
pub struct AscSource {
    path: Option<PathBuf>,
    content: String,
}

impl AscSource {
    /// Read the file at `path` into memory
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            content,
        })
    }

    /// Wrap text that is already in memory
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            path: None,
            content: content.into(),
        }
    }

    /// Path the source was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Full text of the source
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size of the source text in bytes
    pub fn len_bytes(&self) -> u64 {
        self.content.len() as u64
    }

    /// Total number of lines
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Lines in the zero-based `range`. When the source ends before
    /// `range.end` the error carries the number of lines it does have.
    pub fn lines_in(&self, range: Range<usize>) -> Result<Vec<&str>, usize> {
        let wanted = range.len();
        let lines: Vec<&str> = self.content.lines().skip(range.start).take(wanted).collect();
        if lines.len() < wanted {
            return Err(self.line_count());
        }
        Ok(lines)
    }

    /// Text following the first `header_length` lines, or `None` when the
    /// source does not extend past its header.
    pub fn data_section(&self, header_length: usize) -> Option<&str> {
        let mut offset = 0;
        for (seen, line) in self.content.split_inclusive('\n').enumerate() {
            if seen == header_length {
                return Some(&self.content[offset..]);
            }
            offset += line.len();
        }
        None
    }
}
