//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured host:port
//!     → listener.rs (bind, fail fast)
//!     → Hand off to HTTP layer (one task per connection)
//! ```
//!
//! # Design Decisions
//! - No admission control: connections are not counted or queued
//! - A bind failure is fatal; there is no retry

pub mod listener;

pub use listener::{bind, ListenerError};
