//! Expiry Sweep Task
//!
//! Background task that periodically removes expired keys, so that keys
//! which are never looked up again do not linger.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedKeyCache;

/// Spawns a background task that periodically purges expired keys.
///
/// Returns `None` when `cleanup_interval_secs` is 0. Otherwise the returned
/// handle can be used to abort the task during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = KeyCache::new(MaxAge::Limited(Duration::from_secs(300)), MaxSize::Bounded(100))
///     .into_shared();
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = cleanup_handle {
///     handle.abort();
/// }
/// ```
pub fn spawn_cleanup_task(
    cache: SharedKeyCache,
    cleanup_interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if cleanup_interval_secs == 0 {
        info!("Expiry sweep disabled");
        return None;
    }

    let interval = Duration::from_secs(cleanup_interval_secs);

    Some(tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired keys", removed);
            } else {
                debug!("Expiry sweep: no expired keys found");
            }
        }
    }))
}
