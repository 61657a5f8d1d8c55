//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the upload directory exists and is writable before serving requests.
pub async fn ensure_upload_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    let meta = tokio::fs::metadata(dir).await?;
    if meta.permissions().readonly() {
        warn!(dir = %dir.display(), "upload directory is read-only; uploads will fail");
    } else {
        info!(dir = %dir.display(), "upload directory ready");
    }
    Ok(())
}
