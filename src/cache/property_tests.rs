//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the expiry and eviction rules over generated
//! identifiers and key sets.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use proptest::prelude::*;

use crate::cache::{KeyCache, MaxAge, MaxSize};
use crate::error::KeyCacheError;
use crate::jwk::JsonWebKey;

// == Test Configuration ==
const TEST_MAX_AGE_SECS: u64 = 100;

// == Strategies ==
/// Generates key identifiers
fn kid_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,32}"
}

/// Generates a batch of keys with distinct identifiers
fn batch_strategy() -> impl Strategy<Value = Vec<JsonWebKey>> {
    prop::collection::hash_set(kid_strategy(), 1..20).prop_map(|kids| {
        kids.into_iter()
            .map(|kid| JsonWebKey::new(kid, "RSA"))
            .collect()
    })
}

fn limited(max_size: MaxSize) -> KeyCache {
    KeyCache::new(
        MaxAge::Limited(Duration::from_secs(TEST_MAX_AGE_SECS)),
        max_size,
    )
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { kid: String },
    Get { kid: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        kid_strategy().prop_map(|kid| CacheOp::Add { kid }),
        kid_strategy().prop_map(|kid| CacheOp::Get { kid }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Lookups of identifiers that were never added always miss.
    #[test]
    fn prop_absent_identifier_not_found(batch in batch_strategy(), kid in kid_strategy()) {
        let mut cache = KeyCache::persistent();
        prop_assume!(!batch.iter().any(|k| k.kid == kid));

        let _ = cache.add(&batch[0].kid, &batch);

        prop_assert!(matches!(cache.get(&kid), Err(KeyCacheError::NotFound(_))));
    }

    // Unlimited size stores the whole batch, hit or miss.
    #[test]
    fn prop_unlimited_stores_whole_batch(batch in batch_strategy(), kid in kid_strategy()) {
        let mut cache = KeyCache::persistent();
        let expected_hit = batch.iter().any(|k| k.kid == kid);

        let result = cache.add(&kid, &batch);

        prop_assert_eq!(result.is_ok(), expected_hit);
        prop_assert_eq!(cache.len(), batch.len());
        for key in &batch {
            prop_assert!(cache.contains(&key.kid));
        }
    }

    // Bounded size stores nothing but the requested key.
    #[test]
    fn prop_bounded_stores_only_match(batch in batch_strategy(), pick in any::<prop::sample::Index>()) {
        let mut cache = limited(MaxSize::Bounded(50));
        let kid = batch[pick.index(batch.len())].kid.clone();

        let key = cache.add(&kid, &batch).unwrap();

        prop_assert_eq!(key.kid, kid.clone());
        prop_assert_eq!(cache.len(), 1);
        prop_assert!(cache.contains(&kid));
    }

    // No-check max age never reports expiry, however old the entry.
    #[test]
    fn prop_no_check_never_expires(kid in kid_strategy(), age_days in 0i64..100_000) {
        let mut cache = KeyCache::persistent();
        cache.insert_at(JsonWebKey::new(kid.clone(), "RSA"), Utc::now() - chrono::Duration::days(age_days));

        prop_assert!(cache.get(&kid).is_ok());
    }

    // An entry past its max age is reported once as expired, then is gone.
    #[test]
    fn prop_expired_entry_removed(kid in kid_strategy(), overshoot_ms in 1i64..1_000_000) {
        let mut cache = limited(MaxSize::Bounded(10));
        let age = chrono::Duration::seconds(TEST_MAX_AGE_SECS as i64)
            + chrono::Duration::milliseconds(overshoot_ms);
        cache.insert_at(JsonWebKey::new(kid.clone(), "RSA"), Utc::now() - age);

        prop_assert!(matches!(cache.get(&kid), Err(KeyCacheError::Expired(_))));
        prop_assert!(matches!(cache.get(&kid), Err(KeyCacheError::NotFound(_))));
        prop_assert!(cache.is_empty());
    }

    // The cache never holds more entries than its bound, whatever the operations.
    #[test]
    fn prop_capacity_enforcement(
        max_size in 0usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut cache = limited(MaxSize::Bounded(max_size));

        for op in ops {
            match op {
                CacheOp::Add { kid } => {
                    let batch = vec![JsonWebKey::new(kid.clone(), "RSA"), JsonWebKey::new("unrelated", "EC")];
                    prop_assert!(cache.add(&kid, &batch).is_ok());
                }
                CacheOp::Get { kid } => {
                    let _ = cache.get(&kid);
                }
            }
            prop_assert!(
                cache.len() <= max_size,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_size
            );
        }
    }

    // With capacity k, adding a new key to a full cache evicts exactly the
    // least recently added one.
    #[test]
    fn prop_evicts_least_recently_added(
        kids in prop::collection::vec(kid_strategy(), 2..10),
        new_kid in kid_strategy()
    ) {
        let mut seen = HashSet::new();
        let unique: Vec<String> = kids.into_iter().filter(|k| seen.insert(k.clone())).collect();
        prop_assume!(unique.len() >= 2);
        prop_assume!(!unique.contains(&new_kid));

        let capacity = unique.len();
        let mut cache = limited(MaxSize::Bounded(capacity));

        // First identifier is the oldest
        let now = Utc::now();
        for (i, kid) in unique.iter().enumerate() {
            let age = chrono::Duration::seconds((capacity - i) as i64);
            cache.insert_at(JsonWebKey::new(kid.clone(), "RSA"), now - age);
        }

        cache.add(&new_kid, &[JsonWebKey::new(new_kid.clone(), "RSA")]).unwrap();

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&unique[0]), "Oldest '{}' should be evicted", unique[0]);
        prop_assert!(cache.contains(&new_kid));
        for kid in unique.iter().skip(1) {
            prop_assert!(cache.contains(kid), "'{}' is not the oldest", kid);
        }
    }

    // A disabled cache hands back the key but keeps nothing.
    #[test]
    fn prop_disabled_retains_nothing(batch in batch_strategy(), pick in any::<prop::sample::Index>()) {
        let mut cache = limited(MaxSize::Bounded(0));
        let kid = batch[pick.index(batch.len())].kid.clone();

        prop_assert!(cache.add(&kid, &batch).is_ok());
        prop_assert!(cache.is_empty());
    }

    // Re-adding the same batch keeps a single, refreshed entry.
    #[test]
    fn prop_add_is_idempotent(batch in batch_strategy(), pick in any::<prop::sample::Index>()) {
        let mut cache = limited(MaxSize::Bounded(50));
        let kid = batch[pick.index(batch.len())].kid.clone();
        let stale = Utc::now() - chrono::Duration::seconds(10);
        cache.insert_at(JsonWebKey::new(kid.clone(), "RSA"), stale);

        cache.add(&kid, &batch).unwrap();
        cache.add(&kid, &batch).unwrap();

        prop_assert_eq!(cache.len(), 1);
        prop_assert!(cache.added_at(&kid).unwrap() > stale);
    }
}
