//! Key Entry Module
//!
//! A cached key together with the moment it arrived.

use chrono::{DateTime, Utc};

use crate::cache::MaxAge;
use crate::jwk::JsonWebKey;

// == Key Entry ==
/// A single cached key.
#[derive(Debug, Clone)]
pub struct KeyEntry {
    /// The stored key material
    pub key: JsonWebKey,
    /// When the key was stored. Replacing an entry resets it.
    pub added_at: DateTime<Utc>,
}

impl KeyEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(key: JsonWebKey) -> Self {
        Self::with_added_at(key, Utc::now())
    }

    /// Creates an entry with an explicit arrival time.
    pub fn with_added_at(key: JsonWebKey, added_at: DateTime<Utc>) -> Self {
        Self { key, added_at }
    }

    // == Is Expired ==
    /// Checks the entry against a max-age policy at the current time.
    pub fn is_expired(&self, max_age: MaxAge) -> bool {
        max_age.is_expired(self.added_at, Utc::now())
    }

    // == Age ==
    /// Time elapsed since the entry was stored, zero if the clock went back.
    pub fn age(&self) -> std::time::Duration {
        (Utc::now() - self.added_at)
            .to_std()
            .unwrap_or_default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn key(kid: &str) -> JsonWebKey {
        JsonWebKey::new(kid, "RSA")
    }

    #[test]
    fn test_entry_creation() {
        let before = Utc::now();
        let entry = KeyEntry::new(key("k1"));

        assert_eq!(entry.key.kid, "k1");
        assert!(entry.added_at >= before);
        assert!(!entry.is_expired(MaxAge::Limited(Duration::from_secs(60))));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = KeyEntry::new(key("k1"));
        let max_age = MaxAge::Limited(Duration::from_secs(1));

        assert!(!entry.is_expired(max_age));

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired(max_age));
        assert!(!entry.is_expired(MaxAge::NoCheck));
    }

    #[test]
    fn test_backdated_entry_is_expired() {
        let entry = KeyEntry::with_added_at(key("k1"), Utc::now() - chrono::Duration::seconds(101));
        assert!(entry.is_expired(MaxAge::Limited(Duration::from_secs(100))));
    }

    #[test]
    fn test_entry_age() {
        let entry = KeyEntry::with_added_at(key("k1"), Utc::now() - chrono::Duration::seconds(10));
        let age = entry.age();
        assert!(age >= Duration::from_secs(10));
        assert!(age < Duration::from_secs(11));
    }

    #[test]
    fn test_future_entry_has_zero_age() {
        let entry = KeyEntry::with_added_at(key("k1"), Utc::now() + chrono::Duration::seconds(30));
        assert_eq!(entry.age(), Duration::ZERO);
    }
}
