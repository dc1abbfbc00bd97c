//! Startup errors.
//!
//! Per-request failures never reach this type; they are answered with a
//! status code inside the handler.

use crate::config::ConfigError;
use crate::net::ListenerError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Listener(#[from] ListenerError),
    #[error("upstream user agent: {0}")]
    UserAgent(#[from] axum::http::header::InvalidHeaderValue),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
