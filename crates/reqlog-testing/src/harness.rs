//! Helpers for driving a single request through a wrapped service.

use bytes::Bytes;
use http::{header, Request, Response, StatusCode};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use std::convert::Infallible;
use std::future::Ready;
use tower::service_fn;
use tower::util::ServiceFn;
use tower::{Service, ServiceExt};

type GenericError = Box<dyn std::error::Error + Send + Sync>;

/// Build a `GET` request for `path` with the given `Host` header.
pub fn get_request(host: &str, path: &str) -> Request<()> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::HOST, host)
        .body(())
        .expect("valid test request")
}

/// A handler that answers every request with `status` and `body`.
pub fn text_handler(
    status: StatusCode,
    body: &'static str,
) -> ServiceFn<impl FnMut(Request<()>) -> Ready<Result<Response<Full<Bytes>>, Infallible>> + Clone>
{
    service_fn(move |_req: Request<()>| {
        let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
        *response.status_mut() = status;
        std::future::ready(Ok(response))
    })
}

/// Drive one request through `service` and read the whole response body.
///
/// Reading the body to its end is what completes a request from the point
/// of view of the logger, so the record is available once this returns.
pub async fn send<S, ReqBody, ResBody>(
    service: S,
    request: Request<ReqBody>,
) -> Result<(StatusCode, Bytes), GenericError>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Error: Into<GenericError>,
    ResBody: Body,
    ResBody::Error: Into<GenericError>,
{
    let response = service.oneshot(request).await.map_err(Into::<GenericError>::into)?;
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(Into::<GenericError>::into)?
        .to_bytes();

    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_handler_round_trip() {
        let (status, body) = send(
            text_handler(StatusCode::CREATED, "made"),
            get_request("localhost", "/"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Bytes::from("made"));
    }
}
