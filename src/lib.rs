//! JWKS Cache - An in-memory cache for JSON Web Keys
//!
//! Keeps verification keys by identifier so a token-verification pipeline
//! does not have to download the whole key set for every request. Entries
//! expire after a configurable max age, and the oldest entry is evicted when
//! a configurable max size is exceeded.
//!
//! ```
//! use std::time::Duration;
//! use jwks_cache::{JsonWebKey, KeyCache, KeyCacheError, MaxAge, MaxSize};
//!
//! let mut cache = KeyCache::new(MaxAge::Limited(Duration::from_secs(100)), MaxSize::Bounded(1));
//! let downloaded = vec![JsonWebKey::new("k1", "RSA"), JsonWebKey::new("k2", "RSA")];
//!
//! let key = match cache.get("k1") {
//!     Ok(key) => key,
//!     Err(KeyCacheError::NotFound(_)) | Err(KeyCacheError::Expired(_)) => {
//!         cache.add("k1", &downloaded).unwrap()
//!     }
//!     Err(other) => panic!("{other}"),
//! };
//! assert_eq!(key.kid, "k1");
//! assert_eq!(cache.len(), 1);
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod jwk;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{KeyCache, KeyCacher, MaxAge, MaxSize, SharedKeyCache};
pub use config::Config;
pub use error::KeyCacheError;
pub use jwk::JsonWebKey;
pub use tasks::spawn_cleanup_task;
