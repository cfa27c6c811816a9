//! Testing utilities for reqlog
//!
//! - [`CapturingSink`] keeps every record in memory, optionally dropping
//!   records below a threshold like a real logging backend would.
//! - [`RecordMatcher`] describes the record a test expects.
//! - [`send`], [`get_request`] and [`text_handler`] drive a wrapped handler
//!   through one full request.
//!
//! # Example
//!
//! ```rust
//! use http::StatusCode;
//! use reqlog::{record, RequestLoggerLayer, Severity};
//! use reqlog_testing::{get_request, send, text_handler, CapturingSink, RecordMatcher};
//! use tower::Layer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let sink = CapturingSink::new();
//! let svc = RequestLoggerLayer::new("router", sink.clone())
//!     .layer(text_handler(StatusCode::OK, "Hello World"));
//!
//! send(svc, get_request("localhost:8080", "/")).await.unwrap();
//!
//! RecordMatcher::new()
//!     .level(Severity::Info)
//!     .message("http://localhost:8080/")
//!     .field(record::BYTES, 11u64)
//!     .assert_matches(&sink.last_entry().unwrap());
//! # }
//! ```

pub mod harness;
pub mod matcher;
pub mod sink;

pub use harness::{get_request, send, text_handler};
pub use matcher::RecordMatcher;
pub use sink::CapturingSink;
