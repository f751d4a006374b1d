/// Errors raised while parsing the parameter block
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// A parameter line without a `key = value` separator, or with an empty key
    #[error("Malformed header line {line}: {content:?}")]
    MalformedHeaderLine {
        /// 1-based line number in the source file
        line: usize,
        /// Offending line as read
        content: String,
    },

    /// The same key appeared twice under the `Reject` policy
    #[error("Duplicate parameter {key:?} on line {line} (first defined on line {first_line})")]
    DuplicateParameter {
        /// Repeated key
        key: String,
        /// 1-based line of the first definition
        first_line: usize,
        /// 1-based line of the repeated definition
        line: usize,
    },

    /// The source ended before the parameter block did
    #[error("Header truncated: parameter block ends on line {expected_lines} but the source has {available} lines")]
    TruncatedHeader {
        /// Number of lines the parameter block needs
        expected_lines: usize,
        /// Number of lines in the source
        available: usize,
    },

    /// A required parameter is absent
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A required parameter has an unusable value
    #[error("Invalid value {value:?} for parameter {key}: {reason}")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// Value as parsed
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
