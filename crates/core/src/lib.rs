//! Core types and contracts for roster.
//!
//! Everything in this crate is pure: domain types, the cache and store
//! contracts, the cache key scheme, cache payload serialization and the
//! error taxonomy of the cache-aside repository. Concrete backends and the
//! repository decorator live in the `roster` crate.

pub mod cache;
pub mod employee;
pub mod repository;
pub mod storage;
