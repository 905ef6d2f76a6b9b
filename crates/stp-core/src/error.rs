//! Error types for the Smart Textbook Platform

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error taxonomy for the textbook platform.
///
/// Variants are matched on by callers to decide recovery: `StoreUnavailable`
/// and `Embedding` degrade the chat flow to no-context generation, while
/// `QuotaExhausted` triggers the secondary-provider fallback.
#[derive(Error, Debug)]
pub enum Error {
    #[error("embedding provider error: {0}")]
    Embedding(String),

    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("vector store error: {0}")]
    VectorStore(String),

    #[error("model quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("completion provider error: {0}")]
    Completion(String),

    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("timeout error: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
