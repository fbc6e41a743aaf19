use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasketSyncError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for BasketSyncError {
    fn from(err: serde_json::Error) -> Self {
        BasketSyncError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BasketSyncError>;
