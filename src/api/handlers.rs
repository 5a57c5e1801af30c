//! API Handlers
//!
//! HTTP request handlers for each key cache endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::{KeyCache, SharedKeyCache};
use crate::error::{KeyCacheError, Result};
use crate::models::{AddKeysRequest, HealthResponse, KeyResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lock-guarded key cache
    pub cache: SharedKeyCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: KeyCache) -> Self {
        Self {
            cache: cache.into_shared(),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(KeyCache::new(config.max_age, config.max_size))
    }
}

/// Handler for PUT /keys/:kid
///
/// Hands a freshly downloaded key set to the cache and returns the key `kid`.
pub async fn add_keys_handler(
    State(state): State<AppState>,
    Path(kid): Path<String>,
    Json(req): Json<AddKeysRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate(&kid) {
        return Err(KeyCacheError::InvalidRequest(error_msg));
    }

    let key = {
        let mut cache = state.cache.write().await;
        cache.add(&kid, &req.keys)?
    };
    debug!(kid = %kid, batch = req.keys.len(), "Key set added");

    Ok(Json(KeyResponse::new(kid, key)))
}

/// Handler for GET /keys/:kid
///
/// Looks up a cached key. Expired keys are dropped and reported as such.
pub async fn get_key_handler(
    State(state): State<AppState>,
    Path(kid): Path<String>,
) -> Result<Json<KeyResponse>> {
    // Write lock: lookups may drop expired entries and always update stats
    let mut cache = state.cache.write().await;
    let key = cache.get(&kid)?;

    Ok(Json(KeyResponse::new(kid, key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;

    Json(StatsResponse::new(
        &cache.stats(),
        cache.max_age(),
        cache.max_size(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
