use core::fmt;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Serialized placeholder for a field whose pattern found nothing.
pub const MISSING_SENTINEL: &str = "N/A";

/// Serialized placeholder for a field whose source file could not be read.
pub const ERROR_SENTINEL: &str = "ERR";

/// A single extracted metric, typed once at extraction time.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Float(f64),
    Int(i64),
    Text(String),
    List(Vec<String>),

    /// The pattern matched nothing and the caller supplied no default.
    Missing,

    /// The source file could not be read.
    Error,
}

impl MetricValue {
    /// Coerce a raw extracted token: numeric when the trimmed text parses as
    /// a float, otherwise the trimmed text verbatim.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed.parse::<f64>().map_or_else(|_| Self::Text(trimmed.to_string()), Self::Float)
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// The underlying text, when the value holds any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            Self::Missing => f.write_str(MISSING_SENTINEL),
            Self::Error => f.write_str(ERROR_SENTINEL),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Missing => serializer.serialize_str(MISSING_SENTINEL),
            Self::Error => serializer.serialize_str(ERROR_SENTINEL),
        }
    }
}
