// src/infrastructure/cache.rs
//! In-process TTL cache for pending authorization state.
use crate::application::ports::cache::{CacheEntry, ExpiringStore};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

/// Every operation, including one sweep pass, runs under the same lock.
#[derive(Default)]
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every entry whose expiry is before `now`. Returns how many were removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.expired_at(now));
        before - entries.len()
    }

    /// Start the background sweep. It runs until the returned handle is shut down.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> SweeperHandle {
        let (shutdown, mut signal) = watch::channel(false);
        let cache = Arc::clone(self);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = cache.sweep(Utc::now());
                        if removed > 0 {
                            debug!(removed, "swept expired cache entries");
                        }
                    }
                    changed = signal.changed() => {
                        if changed.is_err() || *signal.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        SweeperHandle { shutdown, task }
    }
}

impl ExpiringStore for TtlCache {
    fn add(&self, key: &str, value: Bytes, expires_at: DateTime<Utc>) {
        self.lock()
            .insert(key.to_owned(), CacheEntry::new(value, expires_at));
    }

    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    fn take(&self, key: &str) -> Option<CacheEntry> {
        self.lock().remove(key)
    }

    fn delete(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// Stops the background sweep started by [`TtlCache::spawn_sweeper`].
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub async fn shutdown(self) {
        // A send error means the task is already gone.
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            warn!(error = %err, "cache sweeper ended abnormally");
        }
    }
}
