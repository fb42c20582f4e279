//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare the
//! filesystem from its storage config alone.

use configs::{StorageBackend, StorageConfig};

/// Warn on a missing static bundle and create the users file's directory.
pub async fn ensure_env(static_dir: &str, storage: &StorageConfig) -> anyhow::Result<()> {
    let data_file = match storage.backend {
        StorageBackend::File => Some(storage.path.as_path()),
        StorageBackend::Memory => None,
    };
    common::env::ensure_env(static_dir, data_file).await
}
