//! HamClock proxy library.
//!
//! A transparent HTTP reverse proxy for a single origin, serving a few
//! statically configured paths from local files instead.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod overrides;

pub use config::schema::ProxyConfig;
pub use error::Error;
pub use http::HttpServer;
