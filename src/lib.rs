//! Error-redirecting HTTP middleware.
//!
//! Inspects the status an upstream handler commits and, when it falls in a
//! configured set of error codes, suppresses the upstream response and sends
//! an external redirect instead.

pub mod codes;
pub mod config;
pub mod error;
pub mod http;
pub mod intercept;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use codes::{CodeRangeMatcher, CodeSpec};
pub use config::ProxyConfig;
pub use error::{ConfigError, WriteError};
pub use http::{Handler, HttpServer, RedirectErrors, RedirectErrorsLayer};
pub use intercept::{ResponseInterceptor, ResponseRecorder, ResponseSink};
pub use lifecycle::Shutdown;
