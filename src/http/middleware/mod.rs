//! HTTP middleware.
//!
//! # Data Flow
//! ```text
//! sink-style handler:
//!     handler.rs (HandlerService) → redirect_errors.rs (serve)
//!         → ResponseInterceptor → ResponseRecorder → Response
//!
//! axum/tower service:
//!     layer.rs (RedirectErrorsService) → inner service → Response
//!         → redirect_errors.rs (filter_response)
//! ```

pub mod handler;
pub mod layer;
pub mod redirect_errors;

pub use handler::{Handler, HandlerService};
pub use layer::{RedirectErrorsLayer, RedirectErrorsService};
pub use redirect_errors::RedirectErrors;
