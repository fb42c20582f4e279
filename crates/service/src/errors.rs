use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Serializing or writing the users document failed. The in-memory
    /// collection already holds the new record when this is returned.
    #[error("persist error: {0}")]
    Persist(String),
    #[error("io error: {0}")]
    Io(String),
    /// `max(id) + 1` would overflow; nothing was appended.
    #[error("no user id left after {0}")]
    IdExhausted(u64),
}

impl ServiceError {
    pub fn persist(path: &std::path::Path, e: impl std::fmt::Display) -> Self {
        Self::Persist(format!("{}: {e}", path.display()))
    }
}
