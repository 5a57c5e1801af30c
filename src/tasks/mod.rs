//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Expiry sweep: Drops keys older than the configured max age

mod cleanup;

pub use cleanup::spawn_cleanup_task;
