use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::HeaderError;

/// A header value, typed once when the header is parsed.
///
/// Finite floats serialize as JSON numbers. Non-finite floats serialize as
/// their text form (`"inf"`, `"NaN"`) because JSON has no representation for
/// them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Integral numeric value
    Integer(i64),
    /// Numeric value with a fractional part
    Float(f64),
    /// Anything that did not parse as a number
    String(String),
}

impl ParameterValue {
    /// Infer the type of a trimmed header value.
    ///
    /// The text is parsed as `f64`. A result with a zero fractional part that
    /// fits in `i64` becomes [`ParameterValue::Integer`]; any other number
    /// stays [`ParameterValue::Float`]. Text that is not a number is kept
    /// verbatim.
    ///
    /// ```
    /// use probegrid::header::ParameterValue;
    ///
    /// assert_eq!(ParameterValue::infer("3.0"), ParameterValue::Integer(3));
    /// assert_eq!(ParameterValue::infer("3.5"), ParameterValue::Float(3.5));
    /// assert_eq!(ParameterValue::infer("abc"), ParameterValue::String("abc".into()));
    /// ```
    pub fn infer(text: &str) -> Self {
        match text.parse::<f64>() {
            Ok(number) if number.fract() == 0.0 && fits_i64(number) => Self::Integer(number as i64),
            Ok(number) => Self::Float(number),
            Err(_) => Self::String(text.to_string()),
        }
    }

    /// Numeric view of the value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::String(_) => None,
        }
    }

    /// Integer view of the value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the inferred type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn fits_i64(number: f64) -> bool {
    number >= i64::MIN as f64 && number < i64::MAX as f64
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Self::Float(v) => serializer.serialize_str(&v.to_string()),
            Self::String(v) => serializer.serialize_str(v),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Parameters of one source file, keyed by name.
///
/// Iteration is in key order so serialized output is deterministic. There is
/// no mutating API; a map is built once, by the header parser or from an
/// iterator, and read thereafter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParameterValue>,
}

impl ParameterMap {
    pub(crate) fn from_map(entries: BTreeMap<String, ParameterValue>) -> Self {
        Self { entries }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries.get(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParameterValue> {
        self.entries.iter()
    }

    /// Numeric value of `key`
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParameterValue::as_f64)
    }

    /// Text value of `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParameterValue::as_str)
    }

    /// A strictly positive integer count stored under `key`.
    ///
    /// # Errors
    ///
    /// [`HeaderError::MissingParameter`] when the key is absent and
    /// [`HeaderError::InvalidParameter`] when the value is not a positive
    /// integer.
    pub fn require_count(&self, key: &str) -> Result<usize, HeaderError> {
        let value = self
            .get(key)
            .ok_or_else(|| HeaderError::MissingParameter(key.to_string()))?;

        match value.as_i64() {
            Some(count) if count > 0 => usize::try_from(count).map_err(|_| {
                HeaderError::InvalidParameter {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "count does not fit in memory index".to_string(),
                }
            }),
            _ => Err(HeaderError::InvalidParameter {
                key: key.to_string(),
                value: value.to_string(),
                reason: format!("expected a positive integer, found {}", value.type_name()),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a ParameterValue);
    type IntoIter = btree_map::Iter<'a, String, ParameterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
