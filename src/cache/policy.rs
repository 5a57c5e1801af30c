//! Cache Policy Module
//!
//! Freshness and capacity policies, including their sentinel values.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Sentinels ==
/// Raw max-age value meaning "never expire".
pub const MAX_AGE_NO_CHECK: i64 = -1;

/// Raw max-size value meaning "unlimited capacity, store whole batches".
pub const MAX_SIZE_UNLIMITED: i64 = -1;

// == Max Age ==
/// How long an entry stays fresh after it was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// Entries never expire by age
    NoCheck,
    /// Entries older than the duration are expired. A zero duration expires
    /// every entry as soon as it is looked up.
    Limited(Duration),
}

impl MaxAge {
    /// Parses a raw seconds value. `-1` is no-check; other negatives are rejected.
    pub fn from_secs(secs: i64) -> Option<Self> {
        match secs {
            MAX_AGE_NO_CHECK => Some(MaxAge::NoCheck),
            s if s >= 0 => Some(MaxAge::Limited(Duration::from_secs(s as u64))),
            _ => None,
        }
    }

    /// Returns the raw seconds value, `-1` for no-check.
    pub fn as_secs(&self) -> i64 {
        match self {
            MaxAge::NoCheck => MAX_AGE_NO_CHECK,
            MaxAge::Limited(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        }
    }

    // == Is Expired ==
    /// Checks whether an entry added at `added_at` is stale at `now`.
    ///
    /// Expired means strictly past `added_at + max_age`. A deadline that does
    /// not fit in a timestamp never passes.
    pub fn is_expired(&self, added_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            MaxAge::NoCheck => false,
            MaxAge::Limited(d) if d.is_zero() => true,
            MaxAge::Limited(d) => chrono::Duration::from_std(*d)
                .ok()
                .and_then(|max| added_at.checked_add_signed(max))
                .is_some_and(|deadline| now > deadline),
        }
    }
}

// == Max Size ==
/// How many entries the cache may hold, and how batches are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxSize {
    /// No bound; every key of a downloaded batch is stored
    Unlimited,
    /// At most this many entries; only the requested key of a batch is stored.
    /// `Bounded(0)` disables caching altogether.
    Bounded(usize),
}

impl MaxSize {
    /// Parses a raw size value. `-1` is unlimited; other negatives are rejected.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            MAX_SIZE_UNLIMITED => Some(MaxSize::Unlimited),
            v if v >= 0 => usize::try_from(v).ok().map(MaxSize::Bounded),
            _ => None,
        }
    }

    /// Returns the raw size value, `-1` for unlimited.
    pub fn as_value(&self) -> i64 {
        match self {
            MaxSize::Unlimited => MAX_SIZE_UNLIMITED,
            MaxSize::Bounded(n) => i64::try_from(*n).unwrap_or(i64::MAX),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, MaxSize::Unlimited)
    }

    /// True for `Bounded(0)`: nothing is ever retained.
    pub fn is_disabled(&self) -> bool {
        matches!(self, MaxSize::Bounded(0))
    }

    /// True if `len` entries is over capacity.
    pub fn is_exceeded_by(&self, len: usize) -> bool {
        match self {
            MaxSize::Unlimited => false,
            MaxSize::Bounded(max) => len > *max,
        }
    }
}
