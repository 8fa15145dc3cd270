//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, forwarded headers)
//!     → middleware/ (RedirectErrors: pass through or redirect)
//!     → server.rs proxy_handler (forward to upstream)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{Handler, RedirectErrors, RedirectErrorsLayer};
pub use server::HttpServer;
