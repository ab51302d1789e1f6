#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error while accessing storage")]
    Io(#[from] std::io::Error),

    /// Storage disabled, quota exceeded, or any other failure reported by the host
    #[error("Storage backend error: {0}")]
    Backend(String),
}
