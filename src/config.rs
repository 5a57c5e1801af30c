//! Configuration Module
//!
//! Handles loading the key cache policies and server settings from
//! environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};

use crate::cache::{MaxAge, MaxSize};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The defaults describe a persistent cache: no expiry and no size limit.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness policy for cached keys
    pub max_age: MaxAge,
    /// Capacity policy for cached keys
    pub max_size: MaxSize,
    /// Address the HTTP server binds to. Anyone who can reach it can replace
    /// cached keys, so it defaults to loopback.
    pub server_host: IpAddr,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KEY_MAX_AGE_SECS` - Max key age in seconds, `-1` never expires,
    ///   `0` expires immediately (default: -1)
    /// - `KEY_MAX_SIZE` - Max cached keys, `-1` unlimited, `0` disables
    ///   caching (default: -1)
    /// - `SERVER_HOST` - Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    ///
    /// Unparseable values, and negatives other than `-1`, fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_age: env_var::<i64>("KEY_MAX_AGE_SECS")
                .and_then(MaxAge::from_secs)
                .unwrap_or(defaults.max_age),
            max_size: env_var::<i64>("KEY_MAX_SIZE")
                .and_then(MaxSize::from_value)
                .unwrap_or(defaults.max_size),
            server_host: env_var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: env_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age: MaxAge::NoCheck,
            max_size: MaxSize::Unlimited,
            server_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
