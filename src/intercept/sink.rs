//! The response writer capability set.

use axum::http::{HeaderMap, StatusCode};

use crate::error::WriteError;

/// A response writer with HTTP semantics.
///
/// Header mutations only take effect before `write_head`. The first
/// `write_head` fixes the status; a `write` without a prior `write_head`
/// commits `200 OK`.
pub trait ResponseSink {
    /// Response headers, mutable until the status is committed.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the response status and headers.
    fn write_head(&mut self, status: StatusCode);

    /// Write body bytes, committing `200 OK` first if needed.
    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError>;

    /// Push buffered bytes to the client.
    fn flush(&mut self) -> Result<(), WriteError> {
        Ok(())
    }

    /// Whether the status and headers have been sent.
    fn is_committed(&self) -> bool;
}
