//! Hello World server with request logging
//!
//! Run with: cargo run -p hello-server
//!
//! Then visit: http://127.0.0.1:8080
//!
//! Logger behavior is read from the environment (or a `.env` file):
//!
//! ```text
//! REQLOG_LEVEL=debug                  # fixed level for every record
//! REQLOG_STATUS_LEVELS=true           # 5xx error, 4xx warn, otherwise info
//! REQLOG_INCLUDE_REQUEST_HEADERS=true # attach request headers
//! HELLO_ADDR=127.0.0.1:8080           # listen address
//! RUST_LOG=hello_server=debug,reqlog=info
//! ```

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use reqlog::{CaptureBody, LogSink, LoggerConfig, RequestLoggerLayer, TracingSink};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::{Service, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type AppResponse = Response<CaptureBody<Full<Bytes>>>;

/// Hello World endpoint, plus a couple of routes that fail on purpose.
async fn handle<B>(req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible> {
    let (status, body) = match req.uri().path() {
        "/" => (StatusCode::OK, "Hello, World!"),
        "/health" => (StatusCode::OK, "OK"),
        "/fail" => (StatusCode::INTERNAL_SERVER_ERROR, "something broke"),
        _ => (StatusCode::NOT_FOUND, "not found"),
    };

    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    Ok(response)
}

/// The full service stack: request ids are generated first so the logger
/// can read them, then echoed back on the response.
fn app<B, K>(
    sink: K,
    config: LoggerConfig,
) -> impl Service<
    Request<B>,
    Response = AppResponse,
    Error = Infallible,
    Future = impl Future<Output = Result<AppResponse, Infallible>> + Send,
> + Clone
+ Send
where
    B: Send + 'static,
    K: LogSink,
{
    ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestLoggerLayer::with_config("hello", sink, config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .service_fn(handle::<B>)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_loaded = reqlog::load_dotenv()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_server=debug,reqlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoggerConfig::from_env()?;
    info!(
        dotenv_loaded,
        level = %config.level(),
        status_levels = config.status_levels(),
        include_request_headers = config.include_request_headers(),
        "Logger configuration loaded"
    );

    let addr: SocketAddr = std::env::var("HELLO_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("hello-server running on http://{}", addr);

    let service = app(TracingSink::new(), config);

    loop {
        let (stream, remote_addr) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        };

        let io = TokioIo::new(stream);
        let service = TowerToHyperService::new(service.clone());

        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                error!(remote_addr = %remote_addr, "Connection error: {}", err);
            }
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqlog::record::{BYTES, COMPONENT, REQUEST_ID};
    use reqlog::Severity;
    use reqlog_testing::{get_request, send, CapturingSink, RecordMatcher};

    #[tokio::test]
    async fn test_app_logs_with_generated_request_id() {
        let sink = CapturingSink::new();
        let svc = app::<(), _>(sink.clone(), LoggerConfig::default());

        let (status, body) = send(svc, get_request("127.0.0.1:8080", "/"))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Bytes::from("Hello, World!"));

        RecordMatcher::new()
            .level(Severity::Info)
            .message("http://127.0.0.1:8080/")
            .field(COMPONENT, "hello")
            .field(BYTES, 13u64)
            .has_field(REQUEST_ID)
            .assert_matches(&sink.last_entry().unwrap());
    }

    #[tokio::test]
    async fn test_app_status_levels() {
        let sink = CapturingSink::new();
        let config = LoggerConfig::builder().with_status_levels().build();
        let svc = app::<(), _>(sink.clone(), config);

        send(svc.clone(), get_request("127.0.0.1:8080", "/fail"))
            .await
            .unwrap();
        send(svc, get_request("127.0.0.1:8080", "/missing"))
            .await
            .unwrap();

        let levels: Vec<_> = sink.entries().into_iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![Severity::Error, Severity::Warn]);
    }
}
