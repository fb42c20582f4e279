//! User stores: the explicit state container handed to request handlers.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StorageBackend, StorageConfig};
use models::user::{Collection, NewUser, UserRecord};
use serde::Serialize;

use crate::errors::ServiceError;

pub use file::FileUserStore;
pub use memory::MemoryUserStore;

/// Trait abstraction for the users collection.
/// Implementations can be memory-only or backed by a JSON file.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Current collection, reloading first if the backend is configured to.
    async fn list(&self) -> Collection;
    /// Append a record with defaulted fields and a derived id.
    async fn create(&self, input: NewUser) -> Result<UserRecord, ServiceError>;
    /// Backing file (if any) and the collection as `list` would return it.
    async fn describe(&self) -> StoreDescription;
}

/// Diagnostic view served by `/api/debug/db`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDescription {
    pub file_path: Option<String>,
    pub users: Collection,
}

/// Build the store selected by `cfg.backend`.
pub async fn build_store(cfg: &StorageConfig) -> Result<Arc<dyn UserStore>, ServiceError> {
    let store: Arc<dyn UserStore> = match cfg.backend {
        StorageBackend::Memory => MemoryUserStore::seeded(cfg.id_policy),
        StorageBackend::File => FileUserStore::from_config(cfg).await?,
    };
    Ok(store)
}
