//! # reqlog
//!
//! Tower middleware that emits one structured log record per HTTP request.
//!
//! The wrapped service behaves exactly like the inner one: same status, same
//! headers, same body bytes. Alongside, each request produces a
//! [`LogRecord`] carrying the request URL as its message and the method,
//! status, response size, latency and (optionally) correlation id and request
//! headers as fields. Records go to an injected [`LogSink`]; [`TracingSink`]
//! forwards them to `tracing`.
//!
//! ## Features
//!
//! - `env` - Load [`LoggerConfig`] from `REQLOG_*` environment variables and `.env` files
//!
//! ## Example
//!
//! ```rust
//! use reqlog::{LoggerConfig, RequestLoggerLayer, TracingSink};
//! use tower::ServiceBuilder;
//! use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
//!
//! let config = LoggerConfig::builder().with_status_levels().build();
//!
//! let _middleware = ServiceBuilder::new()
//!     .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
//!     .layer(RequestLoggerLayer::with_config("router", TracingSink::new(), config))
//!     .layer(PropagateRequestIdLayer::x_request_id());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod capture;
mod config;
mod error;
mod layer;
mod level;
pub mod record;
mod request_id;
mod sink;

pub use capture::{CaptureBody, ResponseCapture};
pub use config::{LoggerConfig, LoggerConfigBuilder};
#[cfg(feature = "env")]
pub use config::{load_dotenv, ENV_PREFIX};
#[cfg(feature = "env")]
pub use error::ConfigError;
pub use error::ParseSeverityError;
pub use layer::{effective_url, serialize_headers, RequestLogger, RequestLoggerLayer, ResponseFuture};
pub use level::Severity;
pub use record::{FieldValue, LogRecord};
pub use request_id::{request_id, X_REQUEST_ID};
pub use sink::{LogSink, TracingSink};
