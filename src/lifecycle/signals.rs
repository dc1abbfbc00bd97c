//! OS signal handling.

/// Resolve when the process is asked to stop (Ctrl-C, or SIGTERM on Unix).
pub async fn wait_for_termination() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = term.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Shutdown future for the server.
///
/// If the handlers cannot be installed the server keeps running and only
/// process termination stops it.
pub async fn shutdown_signal() {
    if let Err(e) = wait_for_termination().await {
        tracing::error!(error = %e, "Failed to install signal handler");
        std::future::pending::<()>().await;
    }
}
