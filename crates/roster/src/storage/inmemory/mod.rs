//! In-memory storage backend for testing.
//!
//! Stores employees in a `HashMap` wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted and is lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let employee = store.create(&fields).await?;
//! ```

mod store;

pub use store::InMemoryStore;
