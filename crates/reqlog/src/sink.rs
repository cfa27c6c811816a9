//! Logging backends that receive request records.
//!
//! The request logger never filters records itself: it computes the level and
//! hands every record to its sink. Whether the record is rendered, shipped or
//! dropped for being below a threshold is entirely the sink's business.

use crate::level::Severity;
use crate::record::{
    LogRecord, BYTES, COMPONENT, DURATION, METHOD, REQUEST_HEADERS, REQUEST_ID, STATUS,
};
use std::sync::Arc;

/// A destination for request records.
///
/// Sinks are shared by every request a logger handles, so they must be
/// `Send + Sync`. Emission is fire-and-forget and cannot fail.
pub trait LogSink: Send + Sync + 'static {
    /// Accept one record.
    fn emit(&self, record: LogRecord);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn emit(&self, record: LogRecord) {
        (**self).emit(record)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn emit(&self, record: LogRecord) {
        (**self).emit(record)
    }
}

/// Sink that forwards records as `tracing` events with target `reqlog`.
///
/// Fields become structured event fields and the URL becomes the event
/// message. Visibility is decided by whatever subscriber is installed.
///
/// # Example
///
/// ```rust
/// use reqlog::{RequestLoggerLayer, TracingSink};
///
/// let layer = RequestLoggerLayer::new("router", TracingSink::new());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new TracingSink
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit_event {
    ($macro:ident, $record:expr) => {
        tracing::$macro!(
            target: "reqlog",
            component = $record.str_field(COMPONENT),
            method = $record.str_field(METHOD),
            status = $record.u64_field(STATUS),
            bytes = $record.u64_field(BYTES),
            duration = $record.u64_field(DURATION),
            request_id = $record.str_field(REQUEST_ID),
            request_headers = $record.str_field(REQUEST_HEADERS),
            "{}",
            $record.message
        )
    };
}

impl LogSink for TracingSink {
    fn emit(&self, record: LogRecord) {
        match record.level {
            Severity::Trace => emit_event!(trace, record),
            Severity::Debug => emit_event!(debug, record),
            Severity::Info => emit_event!(info, record),
            Severity::Warn => emit_event!(warn, record),
            Severity::Error | Severity::Fatal | Severity::Panic => emit_event!(error, record),
        }
    }
}
