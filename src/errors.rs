use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("storage backend error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
