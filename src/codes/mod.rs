//! Status code matching subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware construction:
//!     status spec strings ("401", "500-504", "5xx")
//!     → spec.rs (parse each token into CodeSpec)
//!     → matcher.rs (freeze as immutable CodeRangeMatcher)
//!
//! Per request:
//!     committed status code → CodeRangeMatcher::matches → suppress or pass
//! ```
//!
//! # Design Decisions
//! - Compiled once, shared read-only across requests (no locking)
//! - Construction is atomic: one bad token rejects the whole list
//! - Matching is a linear scan with no allocation

pub mod matcher;
pub mod spec;

pub use matcher::CodeRangeMatcher;
pub use spec::CodeSpec;
