//! HamClock proxy.
//!
//! ```text
//!     Client Request         ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ net::listener ─▶ http::server             │
//!                            │                      │                      │
//!                            │            override? ├── yes, file present ─┼─▶ local file
//!                            │                      │                      │
//!                            │                      └── otherwise ─────────┼─▶ upstream origin
//!     Client Response        │                                             │
//!     ◀──────────────────────┼── http::response (relay minus Connection,  │
//!                            │                   Transfer-Encoding)        │
//!                            └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use hamclock_proxy::cli::Cli;
use hamclock_proxy::lifecycle::shutdown_signal;
use hamclock_proxy::observability::init_logging;
use hamclock_proxy::{net, Error, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = cli.load()?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await?;
    let server = HttpServer::new(config)?;

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
