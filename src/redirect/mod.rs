//! Redirect emission subsystem.
//!
//! # Data Flow
//! ```text
//! suppressed request (captured status, inbound headers + URI)
//!     → origin.rs (rebuild the URL the client asked for)
//!     → template.rs (substitute {status} and {url})
//!     → emitter.rs (Location + redirect status + short body on the real sink)
//! ```
//!
//! # Design Decisions
//! - The client URL comes from X-Forwarded-Proto/Host when both are present
//! - Missing forwarded headers degrade to the local URI, never fail
//! - The URL is query-escaped before substitution

pub mod emitter;
pub mod template;
pub mod origin;

pub use emitter::RedirectEmitter;
pub use template::RedirectTemplate;
pub use origin::{effective_url, UrlSource};
