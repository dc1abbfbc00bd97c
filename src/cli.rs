//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, ProxyConfig};

#[derive(Debug, Parser)]
#[command(name = "hamclock-proxy")]
#[command(about = "HTTP proxy for HamClock that serves selected paths from local files", long_about = None)]
pub struct Cli {
    /// Port to listen on (overrides the config file)
    pub port: Option<u16>,

    /// TOML config file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn load(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }

        Ok(config)
    }
}
