//! Application state with an explicit open/close lifecycle.
//!
//! The store and cache backends are selected via feature flags, opened once
//! at startup, shared with the cached repository through `Arc` handles and
//! closed once at shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use roster_core::cache::Cache;
use roster_core::repository::{EmployeeRepository, OpContext};
use roster_core::storage::EmployeeStore;

use crate::config::Config;
use crate::storage::CachedEmployeeRepository;

#[cfg(feature = "sqlite")]
type Store = crate::storage::SqliteStore;

#[cfg(feature = "inmemory")]
type Store = crate::storage::InMemoryStore;

#[cfg(feature = "memory")]
type CacheBackend = crate::cache::MemoryCache;

#[cfg(feature = "redis")]
type CacheBackend = crate::cache::RedisCache;

#[cfg(feature = "sqlite")]
async fn open_store(config: &Config) -> anyhow::Result<Store> {
    if config.sqlite_path == ":memory:" {
        tracing::debug!("Opening in-memory SQLite store");
        return Store::new_in_memory()
            .await
            .context("failed to open in-memory SQLite database");
    }

    tracing::debug!(path = %config.sqlite_path, "Opening SQLite store");
    Store::new(&config.sqlite_path)
        .await
        .with_context(|| format!("failed to open SQLite database at {}", config.sqlite_path))
}

#[cfg(feature = "inmemory")]
async fn open_store(_config: &Config) -> anyhow::Result<Store> {
    tracing::debug!("Using in-memory store");
    Ok(Store::new())
}

#[cfg(feature = "memory")]
async fn open_cache(config: &Config) -> anyhow::Result<CacheBackend> {
    tracing::debug!(max_entries = config.cache_max_entries, "Using in-memory cache");
    CacheBackend::new(config.cache_max_entries).context("failed to create memory cache")
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> anyhow::Result<CacheBackend> {
    tracing::debug!(url = %config.redis_url, "Connecting to Redis");
    CacheBackend::new(&config.redis_url)
        .await
        .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))
}

/// Shared application state.
///
/// Cheap to clone; clones share the same connections.
#[derive(Clone)]
pub struct AppState {
    /// Employee repository (cached, wraps the durable store).
    pub repo: Arc<dyn EmployeeRepository>,
    store: Arc<Store>,
    pub(crate) cache: Arc<CacheBackend>,
    operation_timeout: Duration,
    shutdown: CancellationToken,
}

impl AppState {
    /// Opens the configured store and cache and wires the repository.
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(open_store(config).await?);
        let cache = Arc::new(open_cache(config).await?);

        let repo = CachedEmployeeRepository::new(store.clone(), cache.clone(), config.cache_ttl())
            .with_key_scheme(config.key_scheme());

        tracing::info!(
            ttl_seconds = config.cache_ttl_seconds,
            timeout_ms = config.operation_timeout_ms,
            "Repository ready"
        );

        Ok(Self {
            repo: Arc::new(repo),
            store,
            cache,
            operation_timeout: config.operation_timeout(),
            shutdown: CancellationToken::new(),
        })
    }

    /// Returns a context for one repository operation.
    ///
    /// The context expires after the configured operation timeout and is
    /// cancelled when [`AppState::signal_shutdown`] is called.
    pub fn operation_context(&self) -> OpContext {
        OpContext::with_timeout(self.operation_timeout).cancellation(self.shutdown.child_token())
    }

    /// Cancels every in-flight operation context.
    pub fn signal_shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Completes once [`AppState::signal_shutdown`] has been called.
    pub async fn shutdown_requested(&self) {
        self.shutdown.cancelled().await;
    }

    /// Closes the cache and the store.
    ///
    /// Both are attempted; the first error is returned.
    pub async fn close(self) -> anyhow::Result<()> {
        let cache_result = self.cache.close().await.context("failed to close cache");
        let store_result = self.store.close().await.context("failed to close store");

        tracing::debug!("Connections closed");
        cache_result.and(store_result)
    }
}

#[cfg(all(test, not(feature = "redis")))]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::employee::EmployeeFields;
    use roster_core::repository::RepositoryError;

    fn test_config() -> Config {
        Config {
            sqlite_path: ":memory:".to_string(),
            ..Config::default()
        }
    }

    fn fields() -> EmployeeFields {
        EmployeeFields::new(
            "Ada",
            "Engineer",
            100,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_open_wires_repository() {
        let state = AppState::open(&test_config()).await.unwrap();

        let ctx = state.operation_context();
        let id = state.repo.create_employee(&ctx, &fields()).await.unwrap().value;
        let employee = state.repo.get_employee(&ctx, id).await.unwrap().value;

        assert_eq!(employee.fields(), fields());
        state.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_cancels_operation_contexts() {
        let state = AppState::open(&test_config()).await.unwrap();
        let ctx = state.operation_context();

        state.signal_shutdown();
        let result = state.repo.list_employees(&ctx).await;

        assert!(matches!(result, Err(RepositoryError::Cancelled { .. })));
        // Contexts created after shutdown are cancelled too
        assert!(state.operation_context().checkpoint("store read").is_err());
        state.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_timeout_expires_immediately() {
        let config = Config {
            operation_timeout_ms: 0,
            ..test_config()
        };
        let state = AppState::open(&config).await.unwrap();

        let result = state.repo.list_employees(&state.operation_context()).await;

        assert!(matches!(
            result,
            Err(RepositoryError::DeadlineExceeded { .. })
        ));
        state.close().await.unwrap();
    }
}
