//! The record handed to a [`LogSink`](crate::LogSink) once per request.

use crate::level::Severity;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field key for the component name bound at construction.
pub const COMPONENT: &str = "component";
/// Field key for the HTTP method.
pub const METHOD: &str = "method";
/// Field key for the response status code.
pub const STATUS: &str = "status";
/// Field key for the number of response body bytes.
pub const BYTES: &str = "bytes";
/// Field key for the elapsed time in nanoseconds.
pub const DURATION: &str = "duration";
/// Field key for the upstream correlation identifier.
pub const REQUEST_ID: &str = "request_id";
/// Field key for the serialized request headers.
pub const REQUEST_HEADERS: &str = "request_headers";

/// A single field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value.
    Str(String),
    /// Unsigned integer value.
    U64(u64),
}

impl FieldValue {
    /// The text value, if this is a string field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::U64(_) => None,
        }
    }

    /// The integer value, if this is an integer field.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::U64(n) => Some(*n),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::U64(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::U64(value)
    }
}

/// One structured log entry: severity, message and a set of named fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Severity the record is emitted at.
    pub level: Severity,
    /// Absolute request URL.
    pub message: String,
    /// Named fields, ordered by key.
    pub fields: BTreeMap<&'static str, FieldValue>,
}

impl LogRecord {
    /// Create a record without fields.
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, replacing any previous value under the same key.
    pub fn with_field(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    /// Look up a field.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Look up a string field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(FieldValue::as_str)
    }

    /// Look up an integer field.
    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.field(key).and_then(FieldValue::as_u64)
    }

    /// Whether a field is present.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}
