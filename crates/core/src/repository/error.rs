use thiserror::Error;
use uuid::Uuid;

use crate::storage::StoreError;

/// Fatal errors of a repository operation.
///
/// Store failures always surface here. Cache failures never do; they are
/// reported as [`CacheWarning`]s next to a successful result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Employee not found: {id}")]
    NotFound { id: Uuid },
    #[error("Store write failed: {0}")]
    StoreWriteFailed(StoreError),
    #[error("Store read failed: {0}")]
    StoreReadFailed(StoreError),
    #[error("Operation cancelled before {step}")]
    Cancelled { step: &'static str },
    #[error("Deadline exceeded before {step}")]
    DeadlineExceeded { step: &'static str },
}

impl RepositoryError {
    /// Classifies a store error raised by a write of `id`.
    pub fn from_store_write(err: StoreError, id: Uuid) -> Self {
        if err.is_not_found() {
            RepositoryError::NotFound { id }
        } else {
            RepositoryError::StoreWriteFailed(err)
        }
    }

    /// Classifies a store error raised by a read of `id`.
    pub fn from_store_read(err: StoreError, id: Uuid) -> Self {
        if err.is_not_found() {
            RepositoryError::NotFound { id }
        } else {
            RepositoryError::StoreReadFailed(err)
        }
    }
}

/// Non-fatal cache problems observed during an operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheWarning {
    /// The cache could not be read, or held a payload that failed to decode.
    /// The operation fell through to the store.
    #[error("Cache read failed for {key}: {reason}")]
    CacheReadFailed { key: String, reason: String },
    /// A cache write or delete failed. The entry may be stale until its TTL
    /// expires.
    #[error("Cache write failed for {key}: {reason}")]
    CacheWriteFailed { key: String, reason: String },
    /// A cache step was not attempted, or was abandoned mid-call, because
    /// the operation context tripped.
    #[error("Cache update skipped for {key}: {reason}")]
    Skipped { key: String, reason: String },
}

impl CacheWarning {
    /// Returns the cache key the warning refers to.
    pub fn key(&self) -> &str {
        match self {
            CacheWarning::CacheReadFailed { key, .. }
            | CacheWarning::CacheWriteFailed { key, .. }
            | CacheWarning::Skipped { key, .. } => key,
        }
    }

    /// Returns true if the cache may now hold stale data for the key.
    pub fn may_be_stale(&self) -> bool {
        !matches!(self, CacheWarning::CacheReadFailed { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let id = Uuid::new_v4();
        let err = StoreError::employee_not_found(id);

        assert_eq!(
            RepositoryError::from_store_write(err.clone(), id),
            RepositoryError::NotFound { id }
        );
        assert_eq!(
            RepositoryError::from_store_read(err, id),
            RepositoryError::NotFound { id }
        );
    }

    #[test]
    fn test_store_failures_keep_direction() {
        let id = Uuid::new_v4();
        let err = StoreError::ConnectionFailed("refused".to_string());

        assert!(matches!(
            RepositoryError::from_store_write(err.clone(), id),
            RepositoryError::StoreWriteFailed(StoreError::ConnectionFailed(_))
        ));
        assert!(matches!(
            RepositoryError::from_store_read(err, id),
            RepositoryError::StoreReadFailed(StoreError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_not_found_display() {
        let error = RepositoryError::NotFound { id: Uuid::nil() };
        assert_eq!(
            error.to_string(),
            "Employee not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_warning_key_and_staleness() {
        let read = CacheWarning::CacheReadFailed {
            key: "entity:1".to_string(),
            reason: "down".to_string(),
        };
        let write = CacheWarning::CacheWriteFailed {
            key: "entities:list".to_string(),
            reason: "down".to_string(),
        };

        assert_eq!(read.key(), "entity:1");
        assert!(!read.may_be_stale());
        assert_eq!(write.key(), "entities:list");
        assert!(write.may_be_stale());
        assert_eq!(
            write.to_string(),
            "Cache write failed for entities:list: down"
        );
    }
}
