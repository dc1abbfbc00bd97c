//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler, listener and lifecycle events
//!     → tracing macros (client address + message on every request event)
//!     → logging.rs subscriber (EnvFilter, fmt layer)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
