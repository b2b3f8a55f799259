use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Outcome of a successful cache lookup.
///
/// Absence is a normal result, distinct from `Err`, which always means the
/// cache itself misbehaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Found(Vec<u8>),
    Miss,
}

impl CacheLookup {
    /// Builds a lookup from an optional payload.
    pub fn from_option(value: Option<Vec<u8>>) -> Self {
        match value {
            Some(bytes) => CacheLookup::Found(bytes),
            None => CacheLookup::Miss,
        }
    }
}

/// Key-value cache with per-key TTL.
///
/// Each call must be atomic on its own; nothing stronger is assumed.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<CacheLookup>;

    /// Sets a value in the cache with an optional TTL, overwriting any
    /// previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Releases the underlying connection. Called once at shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
