//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Ctrl+C / SIGTERM → Shutdown::trigger → server stops accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
