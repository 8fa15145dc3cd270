//! Error types shared across the middleware.

use thiserror::Error;

/// Construction-time failures. The middleware is never installed when one of
/// these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The redirect target template is empty.
    #[error("target url must be set")]
    MissingTarget,

    /// The redirect target cannot be used as a `Location` header value.
    #[error("target url is not a valid header value: {0:?}")]
    InvalidTarget(String),

    /// A status code specification could not be parsed.
    #[error("invalid status code spec {token:?}: {reason}")]
    InvalidCodeSpec { token: String, reason: &'static str },

    /// The configured redirect status is not a usable HTTP status code.
    #[error("invalid output status {0}")]
    InvalidOutputStatus(u16),
}

/// Request-time failures raised by a response sink.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink was closed (client gone, request cancelled).
    #[error("response sink closed")]
    Closed,

    /// Underlying transport error.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered redirect target is not a valid header value.
    #[error("rendered location is not a valid header value")]
    InvalidLocation,
}
