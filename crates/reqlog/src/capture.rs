//! Pass-through response body that observes what is written to the caller.
//!
//! [`CaptureBody`] forwards every frame of the inner body untouched while
//! counting data bytes. The request record is emitted exactly once: when the
//! body reports its end, when it yields an error, or when it is dropped before
//! either, whichever comes first.

use crate::layer::PendingRecord;
use bytes::Buf;
use http::StatusCode;
use http_body::{Body, Frame, SizeHint};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Per-request view of the response as seen by the caller.
pub struct ResponseCapture {
    status: StatusCode,
    bytes_written: u64,
    pending: Option<PendingRecord>,
}

impl ResponseCapture {
    pub(crate) fn new(status: StatusCode, pending: PendingRecord) -> Self {
        Self {
            status,
            bytes_written: 0,
            pending: Some(pending),
        }
    }

    /// Status sent to the caller.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body bytes passed through so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Whether the record has already been emitted.
    pub fn is_finished(&self) -> bool {
        self.pending.is_none()
    }

    fn record_bytes(&mut self, len: usize) {
        self.bytes_written = self.bytes_written.saturating_add(len as u64);
    }

    fn finish(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.complete(self.status, self.bytes_written);
        }
    }
}

impl Drop for ResponseCapture {
    fn drop(&mut self) {
        self.finish();
    }
}

impl std::fmt::Debug for ResponseCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCapture")
            .field("status", &self.status)
            .field("bytes_written", &self.bytes_written)
            .field("finished", &self.is_finished())
            .finish()
    }
}

pin_project! {
    /// Response body wrapper produced by [`RequestLogger`](crate::RequestLogger).
    #[derive(Debug)]
    pub struct CaptureBody<B> {
        #[pin]
        inner: B,
        capture: ResponseCapture,
    }
}

impl<B> CaptureBody<B> {
    pub(crate) fn new(inner: B, capture: ResponseCapture) -> Self {
        Self { inner, capture }
    }

    /// What has been observed so far.
    pub fn capture(&self) -> &ResponseCapture {
        &self.capture
    }

    /// The wrapped body.
    pub fn get_ref(&self) -> &B {
        &self.inner
    }
}

impl<B> Body for CaptureBody<B>
where
    B: Body,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let mut this = self.project();
        let frame = ready!(this.inner.as_mut().poll_frame(cx));

        match &frame {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    this.capture.record_bytes(data.remaining());
                }
                if this.inner.is_end_stream() {
                    this.capture.finish();
                }
            }
            Some(Err(_)) | None => this.capture.finish(),
        }

        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
