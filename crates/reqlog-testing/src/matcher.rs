//! Declarative expectations on a single record.

use reqlog::{FieldValue, LogRecord, Severity};

/// Matcher for emitted records
#[derive(Debug, Clone, Default)]
pub struct RecordMatcher {
    pub(crate) level: Option<Severity>,
    pub(crate) message: Option<String>,
    pub(crate) fields: Vec<(&'static str, FieldValue)>,
    pub(crate) present: Vec<&'static str>,
    pub(crate) absent: Vec<&'static str>,
}

impl RecordMatcher {
    /// Create a new matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a specific level
    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Match a specific message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Match a field with an exact value
    pub fn field(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// Require a field to be present, whatever its value
    pub fn has_field(mut self, key: &'static str) -> Self {
        self.present.push(key);
        self
    }

    /// Require a field to be absent
    pub fn lacks_field(mut self, key: &'static str) -> Self {
        self.absent.push(key);
        self
    }

    /// Check if the matcher matches a record
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(level) = self.level {
            if record.level != level {
                return false;
            }
        }

        if let Some(message) = &self.message {
            if &record.message != message {
                return false;
            }
        }

        for (key, expected) in &self.fields {
            if record.field(key) != Some(expected) {
                return false;
            }
        }

        if !self.present.iter().all(|key| record.has_field(key)) {
            return false;
        }

        !self.absent.iter().any(|key| record.has_field(key))
    }

    /// Panic with a readable diff when `record` does not match.
    #[track_caller]
    pub fn assert_matches(&self, record: &LogRecord) {
        if !self.matches(record) {
            panic!(
                "record does not match\n  expected: {:?}\n  actual:   {:?}",
                self, record
            );
        }
    }
}
