use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// A missing key is not an error: lookups report it as
/// [`CacheLookup::Miss`](super::CacheLookup::Miss).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
