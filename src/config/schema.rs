//! Configuration schema definitions.
//!
//! All types derive `Deserialize` for loading from config files.
//! `ProxyConfig::default()` is the stock HamClock deployment.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Origin server the proxy forwards to.
    pub upstream: UpstreamConfig,

    /// Request path (exact, query string included) → local file path.
    pub overrides: BTreeMap<String, PathBuf>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "/esats/esats.txt".to_string(),
            PathBuf::from("/opt/hamclock-proxy/esats.txt"),
        );

        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            overrides,
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Port 0 asks the OS for an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding and logging.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; the request target is appended verbatim.
    pub base_url: String,

    /// Total deadline for one upstream fetch, body included, in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent when the client did not supply one.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://clearskyinstitute.com".to_string(),
            timeout_secs: 15,
            user_agent: "HamClockProxy/1.0".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
