//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, method gate)
//!     → overrides (exact lookup, local file read)
//!     → upstream.rs (GET to the origin, deadline enforced)
//!     → response.rs (override body, or relay minus connection headers)
//!     → Send to client
//! ```

pub mod response;
pub mod server;
pub mod upstream;

pub use server::{AppState, HttpServer};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResponse};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";
