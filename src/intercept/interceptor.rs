//! Status-code catching response wrapper.
//!
//! # Responsibilities
//! - Hold back headers until the upstream commits a status
//! - Decide pass-through or suppression once, on the first commit
//! - Forward or discard every later write according to that decision

use axum::http::{HeaderMap, StatusCode};

use crate::codes::CodeRangeMatcher;
use crate::error::WriteError;
use crate::intercept::sink::ResponseSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uncommitted,
    PassThrough,
    Suppressed,
}

/// Wraps the real sink for one request/response cycle.
pub struct ResponseInterceptor<'a> {
    inner: &'a mut dyn ResponseSink,
    matcher: &'a CodeRangeMatcher,
    /// Headers set before commit; discarded when suppressed.
    pending: HeaderMap,
    captured: Option<StatusCode>,
    state: State,
}

impl<'a> ResponseInterceptor<'a> {
    pub fn new(inner: &'a mut dyn ResponseSink, matcher: &'a CodeRangeMatcher) -> Self {
        Self {
            inner,
            matcher,
            pending: HeaderMap::new(),
            captured: None,
            state: State::Uncommitted,
        }
    }

    /// The status the upstream committed first, if it committed at all.
    pub fn captured_code(&self) -> Option<StatusCode> {
        self.captured
    }

    /// Whether the first commit has happened.
    pub fn is_decided(&self) -> bool {
        self.state != State::Uncommitted
    }

    /// True unless the upstream response was suppressed.
    ///
    /// An undecided interceptor counts as pass-through: an upstream that
    /// never wrote anything gets the sink's implicit empty 200.
    pub fn is_passthrough(&self) -> bool {
        self.state != State::Suppressed
    }

    fn commit(&mut self, status: StatusCode) {
        if self.state != State::Uncommitted {
            tracing::trace!(
                status = status.as_u16(),
                "Ignoring superfluous status commit"
            );
            return;
        }
        self.captured = Some(status);

        if self.matcher.matches(status.as_u16()) {
            self.state = State::Suppressed;
            self.pending.clear();
            return;
        }

        self.state = State::PassThrough;
        let headers = std::mem::take(&mut self.pending);
        self.inner.headers_mut().extend(headers);
        self.inner.write_head(status);
    }
}

impl ResponseSink for ResponseInterceptor<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        match self.state {
            State::PassThrough => self.inner.headers_mut(),
            State::Uncommitted | State::Suppressed => &mut self.pending,
        }
    }

    fn write_head(&mut self, status: StatusCode) {
        self.commit(status);
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        if self.state == State::Uncommitted {
            self.commit(StatusCode::OK);
        }
        match self.state {
            State::Suppressed => Ok(buf.len()),
            _ => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        if self.state == State::Uncommitted {
            self.commit(StatusCode::OK);
        }
        match self.state {
            State::Suppressed => Ok(()),
            _ => self.inner.flush(),
        }
    }

    fn is_committed(&self) -> bool {
        self.is_decided()
    }
}
