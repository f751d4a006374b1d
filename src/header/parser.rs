use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::HashMap;

use log::debug;

use crate::layout::{AscLayout, AscSource, DuplicateKeyPolicy, DEFAULT_COMMENT_MARKER};

use super::error::HeaderError;
use super::value::{ParameterMap, ParameterValue};

/// Parser for `<marker><key> = <value>` parameter lines
#[derive(Debug, Clone)]
pub struct HeaderParser {
    comment_marker: String,
    duplicate_keys: DuplicateKeyPolicy,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_MARKER, DuplicateKeyPolicy::Reject)
    }
}

impl HeaderParser {
    /// Create a parser with an explicit comment marker and duplicate policy
    pub fn new(comment_marker: impl Into<String>, duplicate_keys: DuplicateKeyPolicy) -> Self {
        Self {
            comment_marker: comment_marker.into(),
            duplicate_keys,
        }
    }

    /// Create a parser matching a source layout
    pub fn from_layout(layout: &AscLayout) -> Self {
        Self::new(layout.comment_marker.clone(), layout.duplicate_keys)
    }

    /// Parse the parameter block of `source` as described by `layout`
    pub fn parse_source(
        &self,
        source: &AscSource,
        layout: &AscLayout,
    ) -> Result<ParameterMap, HeaderError> {
        let range = layout.parameter_lines();
        let lines = source
            .lines_in(range.clone())
            .map_err(|available| HeaderError::TruncatedHeader {
                expected_lines: range.end,
                available,
            })?;
        // Line numbers in errors are 1-based.
        self.parse_lines(lines, range.start + 1)
    }

    /// Parse consecutive lines, the first of which is line `first_line` of
    /// the source (1-based).
    pub fn parse_lines<'a, I>(&self, lines: I, first_line: usize) -> Result<ParameterMap, HeaderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = BTreeMap::new();
        let mut defined_on: HashMap<String, usize> = HashMap::new();

        for (offset, raw) in lines.into_iter().enumerate() {
            let line = first_line + offset;
            let (key, value) = self.parse_line(raw, line)?;

            match entries.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match self.duplicate_keys {
                    DuplicateKeyPolicy::Reject => {
                        return Err(HeaderError::DuplicateParameter {
                            first_line: defined_on.get(&key).copied().unwrap_or(line),
                            key,
                            line,
                        });
                    }
                    DuplicateKeyPolicy::LastWriteWins => {
                        debug!("Parameter {:?} redefined on line {}", key, line);
                        slot.insert(value);
                    }
                },
            }
            defined_on.insert(key, line);
        }

        debug!("Parsed {} header parameters", entries.len());
        Ok(ParameterMap::from_map(entries))
    }

    /// Split a single line into its key and inferred value
    pub fn parse_line(&self, raw: &str, line: usize) -> Result<(String, ParameterValue), HeaderError> {
        let malformed = || HeaderError::MalformedHeaderLine {
            line,
            content: raw.to_string(),
        };

        let text = raw.trim_end_matches(['\r', '\n']).trim_start();
        let text = text.strip_prefix(self.comment_marker.as_str()).unwrap_or(text);

        let (key, value) = text.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }

        Ok((key.to_string(), ParameterValue::infer(value.trim())))
    }
}
