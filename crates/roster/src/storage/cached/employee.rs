//! Cached employee repository decorator.
//!
//! The store write always completes before any cache mutation. Cache
//! problems never fail an operation; they come back as warnings on the
//! [`Outcome`].
//!
//! Cache calls and store reads run under the operation's deadline and
//! cancellation token. Store writes are only gated before they start.
//!
//! Without locks, two race windows remain and are bounded by the TTL:
//! - A read that repopulates the entity key can land after a concurrent
//!   update's cache write, or after a concurrent delete's invalidation. In
//!   the delete case the removed record stays servable from the cache until
//!   the entry expires.
//! - A read concurrent with an update that has committed but not yet written
//!   the cache observes the old value.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use roster_core::cache::{
    deserialize_employee, deserialize_employees, serialize_employee, serialize_employees, Cache,
    CacheLookup, KeyScheme, SerializationError,
};
use roster_core::employee::{Employee, EmployeeFields};
use roster_core::repository::{
    CacheWarning, EmployeeRepository, OpContext, Outcome, RepositoryError, Result,
};
use roster_core::storage::EmployeeStore;

/// Cached employee repository decorator.
///
/// Holds no mutable state of its own; concurrent operations share the store
/// and cache handles and rely on their per-call atomicity.
///
/// # Type Parameters
///
/// * `S` - The underlying durable store
/// * `C` - The cache implementation
pub struct CachedEmployeeRepository<S, C>
where
    S: EmployeeStore,
    C: Cache,
{
    store: Arc<S>,
    cache: Arc<C>,
    keys: KeyScheme,
    ttl: Duration,
}

impl<S, C> CachedEmployeeRepository<S, C>
where
    S: EmployeeStore,
    C: Cache,
{
    /// Creates a new cached repository using the default key scheme.
    ///
    /// # Arguments
    ///
    /// * `store` - The durable store, source of truth
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every cache entry written
    pub fn new(store: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            keys: KeyScheme::default(),
            ttl,
        }
    }

    /// Replaces the key scheme.
    pub fn with_key_scheme(mut self, keys: KeyScheme) -> Self {
        self.keys = keys;
        self
    }

    /// Looks up `key` and decodes it.
    ///
    /// Returns `None` on a miss, a cache error, an interrupted lookup or a
    /// payload that does not decode. Only a plain miss records no warning.
    async fn read_cached<T>(
        &self,
        ctx: &OpContext,
        key: &str,
        decode: fn(&[u8]) -> std::result::Result<T, SerializationError>,
        warnings: &mut Vec<CacheWarning>,
    ) -> Option<T> {
        let bytes = match ctx.bound("cache read", self.cache.get(key)).await {
            Ok(Ok(CacheLookup::Found(bytes))) => bytes,
            Ok(Ok(CacheLookup::Miss)) => {
                tracing::trace!(key, "Cache miss");
                return None;
            }
            Err(err) => {
                // Interrupted lookup; the store read that follows fails on
                // the same context.
                push_warning(
                    warnings,
                    CacheWarning::CacheReadFailed {
                        key: key.to_string(),
                        reason: err.to_string(),
                    },
                );
                return None;
            }
            Ok(Err(err)) => {
                push_warning(
                    warnings,
                    CacheWarning::CacheReadFailed {
                        key: key.to_string(),
                        reason: err.to_string(),
                    },
                );
                return None;
            }
        };

        match decode(&bytes) {
            Ok(value) => {
                tracing::trace!(key, "Cache hit");
                Some(value)
            }
            Err(err) => {
                // Stale schema or corrupted payload; the store read overwrites it.
                push_warning(
                    warnings,
                    CacheWarning::CacheReadFailed {
                        key: key.to_string(),
                        reason: err.to_string(),
                    },
                );
                None
            }
        }
    }

    /// Writes an encoded payload under `key` with the configured TTL.
    async fn write_cached(
        &self,
        ctx: &OpContext,
        key: &str,
        payload: std::result::Result<Vec<u8>, SerializationError>,
        warnings: &mut Vec<CacheWarning>,
    ) {
        let bytes = match payload {
            Ok(bytes) => bytes,
            Err(err) => {
                push_warning(
                    warnings,
                    CacheWarning::CacheWriteFailed {
                        key: key.to_string(),
                        reason: err.to_string(),
                    },
                );
                return;
            }
        };

        let set = self.cache.set(key, &bytes, Some(self.ttl));
        match ctx.bound("cache write", set).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => push_warning(
                warnings,
                CacheWarning::CacheWriteFailed {
                    key: key.to_string(),
                    reason: err.to_string(),
                },
            ),
            Err(err) => push_warning(warnings, skipped(key, &err)),
        }
    }

    /// Deletes `key` from the cache.
    async fn invalidate(&self, ctx: &OpContext, key: &str, warnings: &mut Vec<CacheWarning>) {
        match ctx.bound("cache invalidation", self.cache.delete(key)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => push_warning(
                warnings,
                CacheWarning::CacheWriteFailed {
                    key: key.to_string(),
                    reason: err.to_string(),
                },
            ),
            Err(err) => push_warning(warnings, skipped(key, &err)),
        }
    }
}

/// Logs a cache warning and adds it to the operation's warnings.
fn push_warning(warnings: &mut Vec<CacheWarning>, warning: CacheWarning) {
    tracing::warn!(key = %warning.key(), warning = %warning, "Cache operation degraded");
    warnings.push(warning);
}

fn skipped(key: &str, err: &RepositoryError) -> CacheWarning {
    CacheWarning::Skipped {
        key: key.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl<S, C> EmployeeRepository for CachedEmployeeRepository<S, C>
where
    S: EmployeeStore + 'static,
    C: Cache + 'static,
{
    async fn create_employee(
        &self,
        ctx: &OpContext,
        fields: &EmployeeFields,
    ) -> Result<Outcome<Uuid>> {
        ctx.checkpoint("store write")?;

        // 1. Persist to storage; the store assigns the id
        let employee = self
            .store
            .create(fields)
            .await
            .map_err(RepositoryError::StoreWriteFailed)?;

        let mut warnings = Vec::new();

        // 2. Cache the stored record
        let key = self.keys.entity_key(employee.id);
        self.write_cached(ctx, &key, serialize_employee(&employee), &mut warnings)
            .await;

        // 3. Invalidate the list cache
        self.invalidate(ctx, self.keys.list_key(), &mut warnings)
            .await;

        tracing::debug!(employee_id = %employee.id, "Employee created");
        Ok(Outcome::new(employee.id, warnings))
    }

    async fn get_employee(&self, ctx: &OpContext, id: Uuid) -> Result<Outcome<Employee>> {
        let key = self.keys.entity_key(id);
        let mut warnings = Vec::new();

        // Check cache first
        ctx.checkpoint("cache read")?;
        if let Some(employee) = self
            .read_cached(ctx, &key, deserialize_employee, &mut warnings)
            .await
        {
            return Ok(Outcome::new(employee, warnings));
        }

        // Cache miss - fetch from the store
        let employee = ctx
            .bound("store read", self.store.get_by_id(id))
            .await?
            .map_err(|e| RepositoryError::from_store_read(e, id))?
            .ok_or(RepositoryError::NotFound { id })?;

        // Populate cache
        self.write_cached(ctx, &key, serialize_employee(&employee), &mut warnings)
            .await;

        Ok(Outcome::new(employee, warnings))
    }

    async fn update_employee(
        &self,
        ctx: &OpContext,
        id: Uuid,
        fields: &EmployeeFields,
    ) -> Result<Outcome<Employee>> {
        ctx.checkpoint("store write")?;

        // 1. Persist to storage
        let employee = self
            .store
            .update(id, fields)
            .await
            .map_err(|e| RepositoryError::from_store_write(e, id))?;

        let mut warnings = Vec::new();

        // 2. Overwrite the entity cache with the stored record
        let key = self.keys.entity_key(id);
        self.write_cached(ctx, &key, serialize_employee(&employee), &mut warnings)
            .await;

        // 3. Invalidate the list cache
        self.invalidate(ctx, self.keys.list_key(), &mut warnings)
            .await;

        tracing::debug!(employee_id = %id, "Employee updated");
        Ok(Outcome::new(employee, warnings))
    }

    async fn delete_employee(&self, ctx: &OpContext, id: Uuid) -> Result<Outcome<()>> {
        ctx.checkpoint("store write")?;

        // 1. Delete from storage
        self.store
            .delete(id)
            .await
            .map_err(|e| RepositoryError::from_store_write(e, id))?;

        let mut warnings = Vec::new();

        // 2. Invalidate the entity cache and the list cache
        let key = self.keys.entity_key(id);
        self.invalidate(ctx, &key, &mut warnings).await;
        self.invalidate(ctx, self.keys.list_key(), &mut warnings)
            .await;

        tracing::debug!(employee_id = %id, "Employee deleted");
        Ok(Outcome::new((), warnings))
    }

    async fn list_employees(&self, ctx: &OpContext) -> Result<Outcome<Vec<Employee>>> {
        let key = self.keys.list_key();
        let mut warnings = Vec::new();

        // Check cache first
        ctx.checkpoint("cache read")?;
        if let Some(employees) = self
            .read_cached(ctx, key, deserialize_employees, &mut warnings)
            .await
        {
            tracing::trace!(count = employees.len(), "Serving employee list from cache");
            return Ok(Outcome::new(employees, warnings));
        }

        // Cache miss - fetch from the store
        let employees = ctx
            .bound("store read", self.store.list_all())
            .await?
            .map_err(RepositoryError::StoreReadFailed)?;

        // Populate cache
        self.write_cached(ctx, key, serialize_employees(&employees), &mut warnings)
            .await;

        Ok(Outcome::new(employees, warnings))
    }
}
