//! Upward contract of the cache-aside repository.
//!
//! Callers see store failures as [`RepositoryError`] and cache failures as
//! [`CacheWarning`]s attached to an otherwise successful [`Outcome`].

mod context;
mod error;
mod outcome;
mod traits;

pub use context::OpContext;
pub use error::{CacheWarning, RepositoryError, Result};
pub use outcome::Outcome;
pub use traits::EmployeeRepository;
