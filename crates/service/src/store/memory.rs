use std::sync::Arc;

use async_trait::async_trait;
use configs::IdPolicy;
use models::user::{seed, Collection, NewUser, UserRecord};
use tokio::sync::RwLock;
use tracing::info;

use super::{StoreDescription, UserStore};
use crate::{errors::ServiceError, metrics, writer};

/// Memory-only collection. Starts from the seed and is lost on exit.
pub struct MemoryUserStore {
    users: RwLock<Collection>,
    id_policy: IdPolicy,
}

impl MemoryUserStore {
    pub fn seeded(id_policy: IdPolicy) -> Arc<Self> {
        Self::with_users(seed(), id_policy)
    }

    pub fn with_users(users: Collection, id_policy: IdPolicy) -> Arc<Self> {
        Arc::new(Self { users: RwLock::new(users), id_policy })
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Collection {
        self.users.read().await.clone()
    }

    async fn create(&self, input: NewUser) -> Result<UserRecord, ServiceError> {
        let mut users = self.users.write().await;
        let record = writer::append(&mut users, &input, self.id_policy)?;
        metrics::USERS_CREATED_TOTAL.inc();
        info!(event = "user_created", id = record.id, users = users.len(), "user appended in memory");
        Ok(record)
    }

    async fn describe(&self) -> StoreDescription {
        StoreDescription { file_path: None, users: self.list().await }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_appends_after_seed() -> Result<(), anyhow::Error> {
        let store = MemoryUserStore::seeded(IdPolicy::Sequential);
        assert_eq!(store.list().await, seed());

        let rec = store.create(NewUser::default()).await?;
        assert_eq!(rec, UserRecord::new(3, "User", "user"));
        let rec = store
            .create(NewUser { name: Some("Alice".into()), role: Some("admin".into()) })
            .await?;
        assert_eq!(rec, UserRecord::new(4, "Alice", "admin"));

        let listed = store.list().await;
        assert_eq!(listed.len(), 4);
        assert_eq!(listed.last(), Some(&rec));

        let desc = store.describe().await;
        assert!(desc.file_path.is_none());
        assert_eq!(desc.users, listed);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let store = MemoryUserStore::seeded(IdPolicy::NextMax);
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(NewUser { name: Some(format!("u{i}")), role: None }).await
            }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (3..19).collect::<Vec<u64>>());
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_ids_leave_collection_unchanged() {
        let top = vec![UserRecord::new(u64::MAX, "Max", "user")];
        let store = MemoryUserStore::with_users(top.clone(), IdPolicy::NextMax);
        let res = store.create(NewUser::default()).await;
        assert!(matches!(res, Err(ServiceError::IdExhausted(_))));
        assert_eq!(store.list().await, top);
    }
}
