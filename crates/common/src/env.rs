//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the static bundle is missing and create the data directory
/// that will hold the users file, if any.
pub async fn ensure_env(static_dir: &str, data_file: Option<&Path>) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "frontend bundle directory not found; static assets may 404");
    }
    if let Some(parent) = data_file.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_of_data_file() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("ensure_env_{}", uuid::Uuid::new_v4()));
        let file = root.join("nested").join("db.json");
        ensure_env("/nonexistent-static-dir", Some(&file)).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn memory_only_needs_no_directory() -> anyhow::Result<()> {
        ensure_env("/nonexistent-static-dir", None).await?;
        ensure_env("/nonexistent-static-dir", Some(Path::new("db.json"))).await?;
        Ok(())
    }
}
