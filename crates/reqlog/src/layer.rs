//! Request logging middleware
//!
//! [`RequestLoggerLayer`] wraps any `tower` HTTP service. The wrapped service
//! answers exactly like the inner one and, per request, hands one
//! [`LogRecord`] to the configured [`LogSink`]:
//!
//! - message: the absolute request URL, `"<scheme>://<host><target>"`
//! - `component`: the name the layer was built with
//! - `method`, `status`, `bytes`, `duration` (nanoseconds)
//! - `request_id`: only when an upstream middleware set one
//! - `request_headers`: only when enabled in [`LoggerConfig`]
//!
//! # Example
//!
//! ```rust
//! use reqlog::{LoggerConfig, RequestLoggerLayer, Severity, TracingSink};
//! use tower::ServiceBuilder;
//!
//! let config = LoggerConfig::builder()
//!     .with_status_levels()
//!     .with_request_headers_included()
//!     .build();
//!
//! let _stack = ServiceBuilder::new()
//!     .layer(RequestLoggerLayer::with_config("api", TracingSink::new(), config))
//!     .layer(RequestLoggerLayer::with_level("internal", TracingSink::new(), Severity::Debug));
//! ```

use crate::capture::{CaptureBody, ResponseCapture};
use crate::config::LoggerConfig;
use crate::level::Severity;
use crate::record::{
    LogRecord, BYTES, COMPONENT, DURATION, METHOD, REQUEST_HEADERS, REQUEST_ID, STATUS,
};
use crate::request_id::request_id;
use crate::sink::LogSink;
use http::{header, HeaderMap, Request, Response, StatusCode};
use pin_project_lite::pin_project;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

struct Shared {
    component: String,
    sink: Arc<dyn LogSink>,
    config: LoggerConfig,
}

/// Layer that logs one record per request through a [`LogSink`].
#[derive(Clone)]
pub struct RequestLoggerLayer {
    shared: Arc<Shared>,
}

impl RequestLoggerLayer {
    /// Create a logger with the default configuration.
    ///
    /// Every record is emitted at `Info`, whatever the response status.
    pub fn new(name: impl Into<String>, sink: impl LogSink) -> Self {
        Self::with_config(name, sink, LoggerConfig::default())
    }

    /// Create a logger with a custom configuration.
    pub fn with_config(name: impl Into<String>, sink: impl LogSink, config: LoggerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                component: name.into(),
                sink: Arc::new(sink),
                config,
            }),
        }
    }

    /// Create a logger that emits every record at `level`, without headers.
    pub fn with_level(name: impl Into<String>, sink: impl LogSink, level: Severity) -> Self {
        let config = LoggerConfig::builder().with_logging_level(level).build();
        Self::with_config(name, sink, config)
    }

    /// Component name attached to every record.
    pub fn component(&self) -> &str {
        &self.shared.component
    }

    /// Configuration in effect.
    pub fn config(&self) -> &LoggerConfig {
        &self.shared.config
    }
}

impl fmt::Debug for RequestLoggerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLoggerLayer")
            .field("component", &self.shared.component)
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for RequestLoggerLayer {
    type Service = RequestLogger<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogger {
            inner,
            shared: self.shared.clone(),
        }
    }
}

/// Service produced by [`RequestLoggerLayer`].
#[derive(Clone)]
pub struct RequestLogger<S> {
    inner: S,
    shared: Arc<Shared>,
}

impl<S> RequestLogger<S> {
    /// Get a reference to the inner service.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consume the logger, returning the inner service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for RequestLogger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("inner", &self.inner)
            .field("component", &self.shared.component)
            .finish_non_exhaustive()
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogger<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<CaptureBody<ResBody>>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let pending = PendingRecord::from_request(self.shared.clone(), &req, start);

        ResponseFuture {
            inner: self.inner.call(req),
            pending: Some(pending),
        }
    }
}

pin_project! {
    /// Response future of [`RequestLogger`].
    pub struct ResponseFuture<F> {
        #[pin]
        inner: F,
        pending: Option<PendingRecord>,
    }
}

impl<F, ResBody, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<CaptureBody<ResBody>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.inner.poll(cx));

        // Set in `call` and taken on the only `Ready`; a future is never
        // polled again after completing.
        let pending = this
            .pending
            .take()
            .expect("ResponseFuture polled after completion");

        match result {
            Ok(response) => {
                let status = response.status();
                Poll::Ready(Ok(response.map(|body| {
                    CaptureBody::new(body, ResponseCapture::new(status, pending))
                })))
            }
            Err(err) => {
                // Nothing was written: default status, empty body.
                pending.complete(StatusCode::OK, 0);
                Poll::Ready(Err(err))
            }
        }
    }
}

/// Everything about a request that its record needs, captured before the
/// request is handed to the inner service.
pub(crate) struct PendingRecord {
    shared: Arc<Shared>,
    start: Instant,
    method: String,
    url: String,
    request_id: Option<String>,
    request_headers: Option<String>,
}

impl PendingRecord {
    fn from_request<B>(shared: Arc<Shared>, req: &Request<B>, start: Instant) -> Self {
        let request_headers = shared
            .config
            .include_request_headers()
            .then(|| serialize_headers(req.headers()));

        Self {
            start,
            method: req.method().to_string(),
            url: effective_url(req),
            request_id: request_id(req),
            request_headers,
            shared,
        }
    }

    /// Build the record for a finished response and hand it to the sink.
    pub(crate) fn complete(self, status: StatusCode, bytes: u64) {
        let elapsed = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        let mut record = LogRecord::new(self.shared.config.severity_for(status), self.url)
            .with_field(COMPONENT, self.shared.component.as_str())
            .with_field(METHOD, self.method)
            .with_field(STATUS, u64::from(status.as_u16()))
            .with_field(BYTES, bytes)
            .with_field(DURATION, elapsed.max(1));

        if let Some(id) = self.request_id {
            record = record.with_field(REQUEST_ID, id);
        }
        if let Some(headers) = self.request_headers {
            record = record.with_field(REQUEST_HEADERS, headers);
        }

        self.shared.sink.emit(record);
    }
}

/// Absolute URL of the request: the URI scheme (`http` when the request does
/// not declare one), the `Host` header (or the URI authority) and the
/// request target.
pub fn effective_url<B>(req: &Request<B>) -> String {
    let uri = req.uri();
    let scheme = uri.scheme_str().unwrap_or("http");
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or_default();
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .filter(|pq| !pq.is_empty())
        .unwrap_or("/");

    format!("{}://{}{}", scheme, host, target)
}

/// JSON object mapping each header name to the list of its values.
pub fn serialize_headers(headers: &HeaderMap) -> String {
    let mut map = serde_json::Map::new();

    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|value| serde_json::Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect();
        map.insert(name.as_str().to_string(), serde_json::Value::Array(values));
    }

    serde_json::Value::Object(map).to_string()
}
