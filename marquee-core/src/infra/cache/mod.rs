//! Cache infra.
//!
//! [`CacheStore`] layers expiry, negative caching and the override namespace
//! over any [`KeyValueStore`]. Two backends ship: a `cacache` directory for
//! real runs and a `DashMap` for tests and cache-less runs.

pub mod cache_store;
pub mod disk_store;
pub mod keys;
pub mod kv_store;
pub mod memory_store;

pub use cache_store::*;
pub use disk_store::*;
pub use keys::*;
pub use kv_store::*;
pub use memory_store::*;
