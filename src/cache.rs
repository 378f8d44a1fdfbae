//! Single-flight, per-key memoization for resolved articles.
//!
//! Each key owns a [`OnceCell`]. The map lock is only held while looking up
//! or inserting a cell, never across an await, so different keys compute
//! concurrently while callers racing on the same key wait for one
//! computation. A failed computation leaves the cell empty and the next
//! caller tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Debug)]
struct Stamped<T> {
    at: Instant,
    value: T,
}

#[derive(Debug)]
pub struct ItemCache<T> {
    entries: Mutex<HashMap<String, Arc<OnceCell<Stamped<T>>>>>,
    ttl: Option<Duration>,
}

impl<T: Clone> ItemCache<T> {
    /// `ttl = None` keeps entries for the life of the cache.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Return the value stored under `key`, running `compute` only if there is
    /// none and no other caller is already computing it.
    pub async fn get_or_try_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = self.slot(key);
        let stamped = cell
            .get_or_try_init(|| async {
                debug!(key, "Cache miss");
                compute().await.map(|value| Stamped {
                    at: Instant::now(),
                    value,
                })
            })
            .await?;
        Ok(stamped.value.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn slot(&self, key: &str) -> Arc<OnceCell<Stamped<T>>> {
        let mut entries = self.lock();
        if let Some(cell) = entries.get(key) {
            let expired = match (cell.get(), self.ttl) {
                (Some(stamped), Some(ttl)) => stamped.at.elapsed() >= ttl,
                _ => false,
            };
            if !expired {
                return Arc::clone(cell);
            }
            debug!(key, "Cache entry expired");
        }
        let cell = Arc::new(OnceCell::new());
        entries.insert(key.to_string(), Arc::clone(&cell));
        cell
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<OnceCell<Stamped<T>>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
