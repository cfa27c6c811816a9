//! In-memory sink for asserting on emitted records.

use reqlog::{LogRecord, LogSink, Severity};
use std::sync::{Arc, Mutex};

/// In-memory sink that keeps every record it accepts.
///
/// Clones share the same storage, so one clone can be handed to the logger
/// while another is kept for assertions. Records below the minimum level are
/// dropped, the way a real backend filters below its threshold.
#[derive(Debug, Clone)]
pub struct CapturingSink {
    min_level: Severity,
    entries: Arc<Mutex<Vec<LogRecord>>>,
}

impl CapturingSink {
    /// Create a sink that keeps everything.
    pub fn new() -> Self {
        Self::with_min_level(Severity::Trace)
    }

    /// Create a sink that drops records below `level`.
    pub fn with_min_level(level: Severity) -> Self {
        Self {
            min_level: level,
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Lowest level this sink keeps.
    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    /// All kept records, oldest first.
    pub fn entries(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// The most recent record.
    pub fn last_entry(&self) -> Option<LogRecord> {
        self.lock().last().cloned()
    }

    /// Number of kept records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been kept.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every kept record.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for CapturingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for CapturingSink {
    fn emit(&self, record: LogRecord) {
        if record.level >= self.min_level {
            self.lock().push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let sink = CapturingSink::new();
        let handle = sink.clone();

        handle.emit(LogRecord::new(Severity::Info, "http://localhost/"));

        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.last_entry().map(|r| r.message),
            Some("http://localhost/".to_string())
        );

        sink.reset();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_threshold_drops_lower_levels() {
        let sink = CapturingSink::with_min_level(Severity::Warn);

        sink.emit(LogRecord::new(Severity::Debug, "http://a/"));
        sink.emit(LogRecord::new(Severity::Info, "http://b/"));
        sink.emit(LogRecord::new(Severity::Warn, "http://c/"));
        sink.emit(LogRecord::new(Severity::Error, "http://d/"));

        let messages: Vec<_> = sink.entries().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["http://c/", "http://d/"]);
    }
}
