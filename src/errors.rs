use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error (JSON): {0}")]
    SerializationJson(#[from] serde_json::Error),
    #[error("State storage error: {0}")]
    Storage(String),
    #[error("Transaction item tracked before any transaction")]
    MissingTransactionContext,
    #[error("Initialization failed: {0}")]
    Initialization(String),
}
