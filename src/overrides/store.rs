//! Reading override files.

use std::path::Path;

use axum::body::Bytes;

/// Read the whole override file.
///
/// Returns `None` when the file is missing or unreadable; the caller then
/// forwards the request upstream instead.
pub async fn read_override(path: &Path) -> Option<Bytes> {
    match tokio::fs::read(path).await {
        Ok(data) => Some(Bytes::from(data)),
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "Override file not readable");
            None
        }
    }
}
