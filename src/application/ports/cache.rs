// src/application/ports/cache.rs
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A cached payload together with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    value: Bytes,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: Bytes, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Evaluated against the wall clock on every call.
    pub fn expired(&self) -> bool {
        self.expired_at(Utc::now())
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Short-lived key/value storage for pending authorization state.
///
/// `get` never removes an entry, even an expired one; callers check
/// [`CacheEntry::expired`] themselves. `take` removes and returns in one step.
pub trait ExpiringStore: Send + Sync {
    fn add(&self, key: &str, value: Bytes, expires_at: DateTime<Utc>);
    fn get(&self, key: &str) -> Option<CacheEntry>;
    fn take(&self, key: &str) -> Option<CacheEntry>;
    fn delete(&self, key: &str);
}
