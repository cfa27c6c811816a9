//! Request logger benchmarks
//!
//! Measures what the logger adds on top of a bare handler, and the cost of
//! the pieces it computes for every request.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response};
use http_body_util::{BodyExt, Full};
use reqlog::{effective_url, serialize_headers, LogRecord, LogSink, LoggerConfig, RequestLoggerLayer};
use std::convert::Infallible;
use tokio::runtime::Runtime;
use tower::{service_fn, Layer, ServiceExt};

/// Sink that throws every record away
struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, record: LogRecord) {
        black_box(record);
    }
}

fn request(path: &str) -> Request<()> {
    Request::builder()
        .uri(path)
        .header(header::HOST, "localhost:8080")
        .header(header::USER_AGENT, "reqlog-bench/1.0")
        .header("x-request-id", "550e8400-e29b-41d4-a716-446655440000")
        .body(())
        .unwrap()
}

async fn hello(_req: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::new(Full::new(Bytes::from_static(b"Hello World"))))
}

/// Benchmark a full request with and without the logger
fn bench_request_overhead(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("request_overhead");

    group.bench_function("bare_handler", |b| {
        let svc = service_fn(hello);
        b.iter(|| {
            rt.block_on(async {
                let response = svc.clone().oneshot(request("/")).await.unwrap();
                black_box(response.into_body().collect().await.unwrap().to_bytes())
            })
        })
    });

    let configs = [
        ("default", LoggerConfig::default()),
        ("status_levels", LoggerConfig::builder().with_status_levels().build()),
        (
            "with_headers",
            LoggerConfig::builder().with_request_headers_included().build(),
        ),
    ];

    for (name, config) in configs {
        group.bench_with_input(BenchmarkId::new("logged", name), &config, |b, config| {
            let svc = RequestLoggerLayer::with_config("bench", NullSink, config.clone())
                .layer(service_fn(hello));
            b.iter(|| {
                rt.block_on(async {
                    let response = svc.clone().oneshot(request("/")).await.unwrap();
                    black_box(response.into_body().collect().await.unwrap().to_bytes())
                })
            })
        });
    }

    group.finish();
}

/// Benchmark URL reconstruction
fn bench_effective_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("effective_url");

    for path in ["/", "/users/42", "/search?q=rust&page=3"] {
        let req = request(path);
        group.bench_with_input(BenchmarkId::new("path", path), &req, |b, req| {
            b.iter(|| effective_url(black_box(req)))
        });
    }

    group.finish();
}

/// Benchmark header serialization
fn bench_serialize_headers(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_headers");

    for header_count in [1usize, 5, 20].iter() {
        let mut headers = HeaderMap::new();
        for idx in 0..*header_count {
            let name = HeaderName::from_bytes(format!("x-header-{}", idx).as_bytes()).unwrap();
            headers.insert(name, HeaderValue::from_static("application/json"));
        }

        group.bench_with_input(
            BenchmarkId::new("header_count", header_count),
            &headers,
            |b, headers| b.iter(|| serialize_headers(black_box(headers))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_request_overhead,
    bench_effective_url,
    bench_serialize_headers,
);

criterion_main!(benches);
