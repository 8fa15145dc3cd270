//! In-memory response sink.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Response, StatusCode};

use crate::error::WriteError;
use crate::intercept::sink::ResponseSink;

/// Records a response written through [`ResponseSink`].
///
/// Headers are snapshotted when the status is committed, so mutations made
/// afterwards are not part of the recorded response.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    committed: Option<(StatusCode, HeaderMap)>,
    body: Vec<u8>,
    closed: bool,
    flushed: bool,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the client going away: every later write fails.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// The committed status, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.committed.as_ref().map(|(status, _)| *status)
    }

    /// The committed headers, or the pending ones if nothing was committed.
    pub fn headers(&self) -> &HeaderMap {
        match &self.committed {
            Some((_, headers)) => headers,
            None => &self.headers,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn flushed(&self) -> bool {
        self.flushed
    }

    /// Build the final response; an untouched recorder yields an empty 200.
    pub fn into_response(self) -> Response<Body> {
        let (status, headers) = self
            .committed
            .unwrap_or((StatusCode::OK, self.headers));
        let mut response = Response::new(Body::from(Bytes::from(self.body)));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl ResponseSink for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        if self.committed.is_none() {
            self.committed = Some((status, self.headers.clone()));
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        if self.closed {
            return Err(WriteError::Closed);
        }
        self.write_head(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        if self.closed {
            return Err(WriteError::Closed);
        }
        self.write_head(StatusCode::OK);
        self.flushed = true;
        Ok(())
    }

    fn is_committed(&self) -> bool {
        self.committed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::HeaderValue;

    #[test]
    fn test_implicit_ok_on_write() {
        let mut rec = ResponseRecorder::new();
        rec.write(b"hello").unwrap();
        assert_eq!(rec.status(), Some(StatusCode::OK));
        assert_eq!(rec.body(), b"hello");
    }

    #[test]
    fn test_first_commit_wins_and_snapshots_headers() {
        let mut rec = ResponseRecorder::new();
        rec.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        rec.write_head(StatusCode::CREATED);
        rec.write_head(StatusCode::NOT_FOUND);
        rec.headers_mut()
            .insert("x-late", HeaderValue::from_static("1"));

        assert_eq!(rec.status(), Some(StatusCode::CREATED));
        assert_eq!(rec.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
        assert!(rec.headers().get("x-late").is_none());
    }

    #[test]
    fn test_closed_rejects_writes() {
        let mut rec = ResponseRecorder::new();
        rec.close();
        assert!(matches!(rec.write(b"x"), Err(WriteError::Closed)));
        assert!(matches!(rec.flush(), Err(WriteError::Closed)));
        assert!(!rec.is_committed());
    }

    #[test]
    fn test_into_response_defaults_to_ok() {
        let res = ResponseRecorder::new().into_response();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
