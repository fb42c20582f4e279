use std::{io::ErrorKind, marker::PhantomData, path::{Path, PathBuf}};
use tokio::fs;

use crate::errors::ServiceError;

/// A single JSON document on disk.
///
/// Reads hand back raw bytes so the caller decides how to recover from
/// a malformed document. Writes replace the whole file in place.
pub struct JsonDocStore<T> {
    file_path: PathBuf,
    _doc: PhantomData<fn(&T)>,
}

impl<T> JsonDocStore<T>
where
    T: serde::Serialize,
{
    /// Bind to a path, creating missing parent directories. The file itself
    /// is not created until the first `save`.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Io(format!("{}: {e}", parent.display())))?;
        }
        Ok(Self { file_path, _doc: PhantomData })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the raw document. `Ok(None)` when the file does not exist.
    pub async fn read_bytes(&self) -> Result<Option<Vec<u8>>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Io(format!("{}: {e}", self.file_path.display()))),
        }
    }

    /// Serialize `doc` as pretty JSON and overwrite the file.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::persist(&self.file_path, e))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::persist(&self.file_path, e))?;
        Ok(())
    }
}
