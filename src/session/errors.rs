use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid game id: {0}")]
    InvalidGameId(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
