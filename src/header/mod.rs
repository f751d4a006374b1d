//! # Header Parser
//!
//! Turns the parameter block of an `.asc` file into a typed [`ParameterMap`].
//!
//! Each line has the form `# key = value`. The comment marker and line
//! terminator are stripped, the line is split on the first `=`, and both sides
//! are trimmed. The value type is inferred exactly once:
//!
//! | Text    | Value                        |
//! |---------|------------------------------|
//! | `3.0`   | `Integer(3)`                 |
//! | `3.5`   | `Float(3.5)`                 |
//! | `1e3`   | `Integer(1000)`              |
//! | `abc`   | `String("abc")`              |
//!
//! Lines are validated strictly: a line without `=` fails with
//! [`HeaderError::MalformedHeaderLine`]. Repeated keys are rejected unless the
//! parser is configured with [`DuplicateKeyPolicy::LastWriteWins`].
//!
//! ```
//! use probegrid::header::{HeaderParser, ParameterValue};
//!
//! let lines = ["# x-pixels = 10", "# y-pixels = 10", "# z-points = 5", "# mode = CITS"];
//! let params = HeaderParser::default().parse_lines(lines, 4)?;
//!
//! assert_eq!(params.require_count("z-points")?, 5);
//! assert_eq!(params.get("mode"), Some(&ParameterValue::String("CITS".into())));
//! # Ok::<(), probegrid::header::HeaderError>(())
//! ```
//!
//! [`DuplicateKeyPolicy::LastWriteWins`]: crate::layout::DuplicateKeyPolicy::LastWriteWins

mod error;
mod parser;
mod value;


pub use error::HeaderError;
pub use parser::HeaderParser;
pub use value::{ParameterMap, ParameterValue};

/// Number of scan columns
pub const KEY_X_PIXELS: &str = "x-pixels";

/// Number of scan rows
pub const KEY_Y_PIXELS: &str = "y-pixels";

/// Number of points per spectrum
pub const KEY_Z_POINTS: &str = "z-points";
