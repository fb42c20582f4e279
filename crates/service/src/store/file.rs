use std::{path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use configs::{IdPolicy, RefreshPolicy, StorageConfig};
use models::user::{Collection, NewUser, UserEnvelope, UserRecord};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::{StoreDescription, UserStore};
use crate::{
    errors::ServiceError,
    loader::{self, LoadOptions},
    metrics,
    storage::json_doc_store::JsonDocStore,
    writer,
};

/// Users collection persisted as `{ "users": [...] }` in a JSON file.
///
/// One mutex guards both the in-memory collection and the file, so a
/// create holds it across reload, append and write and two creates in this
/// process cannot lose each other's record. Writers in other processes are
/// not coordinated.
pub struct FileUserStore {
    users: Mutex<Collection>,
    doc: JsonDocStore<UserEnvelope>,
    opts: LoadOptions,
    refresh: RefreshPolicy,
    id_policy: IdPolicy,
}

impl FileUserStore {
    /// Bind to `path` and load it once. A missing or broken file is not an
    /// error here; the loader substitutes its fallback.
    pub async fn open<P: Into<PathBuf>>(
        path: P,
        opts: LoadOptions,
        refresh: RefreshPolicy,
        id_policy: IdPolicy,
    ) -> Result<Arc<Self>, ServiceError> {
        let doc = JsonDocStore::new(path).await?;
        let users = read_collection(&doc, &opts).await;
        info!(event = "store_opened", path = %doc.path().display(), users = users.len(), ?refresh, "file user store ready");
        Ok(Arc::new(Self { users: Mutex::new(users), doc, opts, refresh, id_policy }))
    }

    pub async fn from_config(cfg: &StorageConfig) -> Result<Arc<Self>, ServiceError> {
        Self::open(cfg.path.clone(), LoadOptions::from(cfg), cfg.refresh, cfg.id_policy).await
    }

    pub fn path(&self) -> &Path {
        self.doc.path()
    }

    async fn refresh_locked(&self, users: &mut Collection) {
        if self.refresh == RefreshPolicy::EveryRequest {
            *users = read_collection(&self.doc, &self.opts).await;
        }
    }
}

async fn read_collection(doc: &JsonDocStore<UserEnvelope>, opts: &LoadOptions) -> Collection {
    let raw = match doc.read_bytes().await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "users source unreadable");
            None
        }
    };
    let outcome = loader::load(raw.as_deref(), opts);
    metrics::STORE_LOADS_TOTAL.inc();
    if outcome.status.is_fallback() {
        metrics::STORE_FALLBACKS_TOTAL
            .with_label_values(&[outcome.status.as_str()])
            .inc();
        warn!(
            event = "store_fallback",
            path = %doc.path().display(),
            reason = outcome.status.as_str(),
            users = outcome.users.len(),
            "users source unusable; serving fallback"
        );
    } else {
        debug!(event = "store_loaded", path = %doc.path().display(), users = outcome.users.len());
    }
    if outcome.skipped > 0 {
        warn!(
            event = "store_entries_skipped",
            path = %doc.path().display(),
            skipped = outcome.skipped,
            "stored entries without a usable id were left out"
        );
    }
    outcome.users
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn list(&self) -> Collection {
        let mut users = self.users.lock().await;
        self.refresh_locked(&mut users).await;
        users.clone()
    }

    async fn create(&self, input: NewUser) -> Result<UserRecord, ServiceError> {
        let mut users = self.users.lock().await;
        self.refresh_locked(&mut users).await;
        let record = writer::append(&mut users, &input, self.id_policy)?;
        metrics::USERS_CREATED_TOTAL.inc();

        // Move the collection into the envelope for the write, then restore it.
        let envelope = UserEnvelope::new(std::mem::take(&mut *users));
        let saved = self.doc.save(&envelope).await;
        *users = envelope.users;

        if let Err(e) = saved {
            metrics::PERSIST_FAILURES_TOTAL.inc();
            error!(event = "persist_failed", id = record.id, error = %e, "user appended in memory but not persisted");
            return Err(e);
        }
        info!(event = "user_created", id = record.id, users = users.len(), "user appended and persisted");
        Ok(record)
    }

    async fn describe(&self) -> StoreDescription {
        let users = self.list().await;
        StoreDescription { file_path: Some(self.path().display().to_string()), users }
    }
}
