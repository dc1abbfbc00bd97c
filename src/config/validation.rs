//! Configuration validation.
//!
//! Returns all validation errors, not just the first. Runs before the
//! config is accepted into the system.

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("override path {0:?} must start with '/'")]
    RelativeOverridePath(String),
    #[error("upstream base_url {url:?} is not a valid URL: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },
    #[error("upstream base_url {0:?} must use plain http")]
    UnsupportedUpstreamScheme(String),
    #[error("upstream timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("upstream user_agent {0:?} is not a valid header value")]
    InvalidUserAgent(String),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for key in config.overrides.keys() {
        if !key.starts_with('/') {
            errors.push(ValidationError::RelativeOverridePath(key.clone()));
        }
    }

    let base_url = &config.upstream.base_url;
    match Url::parse(base_url) {
        Ok(url) if url.scheme() != "http" => {
            errors.push(ValidationError::UnsupportedUpstreamScheme(base_url.clone()));
        }
        Ok(url) if url.host_str().is_none() => {
            errors.push(ValidationError::InvalidUpstreamUrl {
                url: base_url.clone(),
                reason: "missing host".to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::InvalidUserAgent(
            config.upstream.user_agent.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
