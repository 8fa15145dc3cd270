//! Response interception subsystem.
//!
//! # Data Flow
//! ```text
//! upstream handler
//!     → interceptor.rs (buffer headers until the first status commit)
//!         ├─ status not matched → PassThrough: headers, status and body
//!         │                        forwarded live to the real sink
//!         └─ status matched     → Suppressed: everything discarded
//!     → sink.rs (ResponseSink, the real writer)
//!     → recorder.rs (in-memory sink turned into an http::Response)
//! ```
//!
//! # Design Decisions
//! - Exactly one status commit is observable per response
//! - A body write before any commit is an implicit 200
//! - Interception state is per request and never shared

pub mod interceptor;
pub mod recorder;
pub mod sink;

pub use interceptor::ResponseInterceptor;
pub use recorder::ResponseRecorder;
pub use sink::ResponseSink;
