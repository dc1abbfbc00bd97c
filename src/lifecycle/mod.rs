//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM (signals.rs)
//!     → shutdown future resolves
//!     → server stops accepting → in-flight requests finish → exit 0
//! ```

pub mod signals;

pub use signals::{shutdown_signal, wait_for_termination};
