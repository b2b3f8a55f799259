//! Cached repository decorator.
//!
//! Wraps an `EmployeeStore` with the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from the store and populate cache
//! - **Writes**: Persist to the store, then refresh or invalidate cache entries
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(SqliteStore::new("roster.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//!
//! let repo = CachedEmployeeRepository::new(store, cache, Duration::from_secs(3600));
//! let id = repo.create_employee(&OpContext::new(), &fields).await?.value;
//! ```

mod employee;

pub use employee::CachedEmployeeRepository;
