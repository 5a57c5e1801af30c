//! Response DTOs for the key cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, MaxAge, MaxSize};
use crate::jwk::JsonWebKey;

/// Response body for key lookups and additions
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    /// The requested key identifier
    pub kid: String,
    /// The cached key
    pub key: JsonWebKey,
}

impl KeyResponse {
    pub fn new(kid: impl Into<String>, key: JsonWebKey) -> Self {
        Self {
            kid: kid.into(),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups
    pub misses: u64,
    /// Number of entries dropped for age
    pub expirations: u64,
    /// Number of entries evicted for capacity
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured max age in seconds, -1 for no expiry
    pub max_age_secs: i64,
    /// Configured max size, -1 for unlimited
    pub max_size: i64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and policies
    pub fn new(stats: &CacheStats, max_age: MaxAge, max_size: MaxSize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            max_age_secs: max_age.as_secs(),
            max_size: max_size.as_value(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
