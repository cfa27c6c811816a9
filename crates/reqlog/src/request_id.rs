//! Lookup of an upstream correlation identifier.
//!
//! The logger only reads the identifier; generating one is the job of a
//! request-id middleware such as `tower_http::request_id::SetRequestIdLayer`
//! placed outside the logger.

use http::header::HeaderName;
use http::Request;

/// Conventional request id header.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation identifier of `req`, if an upstream component set one.
///
/// Checks the `tower_http` [`RequestId`](tower_http::request_id::RequestId)
/// extension first, then the `x-request-id` header. Empty or non-UTF-8
/// values count as absent.
pub fn request_id<B>(req: &Request<B>) -> Option<String> {
    let from_extension = req
        .extensions()
        .get::<tower_http::request_id::RequestId>()
        .map(|id| id.header_value());

    from_extension
        .or_else(|| req.headers().get(&X_REQUEST_ID))
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
