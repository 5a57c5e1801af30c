//! Cache Module
//!
//! Provides an in-memory cache for verification keys with max-age expiry
//! and oldest-entry eviction.

mod entry;
mod policy;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::KeyEntry;
pub use policy::{MaxAge, MaxSize, MAX_AGE_NO_CHECK, MAX_SIZE_UNLIMITED};
pub use stats::CacheStats;
pub use store::{KeyCache, KeyCacher, SharedKeyCache};

// == Public Constants ==
/// Maximum allowed key identifier length in bytes
pub const MAX_KID_LENGTH: usize = 256;
