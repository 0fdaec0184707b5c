//! Time-bounded memoization for generated market data

use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Namespace separating symbols that would otherwise collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheNamespace {
    Stock,
    Index,
    Sentiment,
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheNamespace::Stock => "stock",
            CacheNamespace::Index => "index",
            CacheNamespace::Sentiment => "sentiment",
        };
        f.write_str(name)
    }
}

/// Cache key: namespace plus symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub namespace: CacheNamespace,
    pub symbol: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(namespace: CacheNamespace, symbol: impl Into<String>) -> Self {
        Self {
            namespace,
            symbol: symbol.into(),
        }
    }

    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::new(CacheNamespace::Stock, symbol)
    }

    pub fn index(symbol: impl Into<String>) -> Self {
        Self::new(CacheNamespace::Index, symbol)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.namespace, self.symbol)
    }
}

/// Thread-safe memo whose entries expire after a fixed lifespan.
///
/// Expired entries are dropped lazily on lookup and recomputed by the caller.
/// Concurrent misses on the same key share a single fetch.
pub struct MemoCache<V> {
    cache: Arc<RwLock<TimedCache<CacheKey, V>>>,
    in_flight: Arc<Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>>,
}

impl<V: Clone> MemoCache<V> {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a live value from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert or overwrite a value
    pub async fn insert(&self, key: CacheKey, value: V) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get or fetch a value using the provided fetcher function
    ///
    /// A live entry is returned as-is. Otherwise the fetcher runs and its
    /// result overwrites the entry. Callers missing on the same key wait for
    /// the first fetch and then read its result.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(%key, "cache hit");
            return Ok(value);
        }

        let slot = {
            let mut in_flight = self.in_flight.lock().await;
            Arc::clone(in_flight.entry(key.clone()).or_default())
        };

        let result = {
            let _guard = slot.lock().await;

            // Another caller may have filled the entry while we waited
            if let Some(value) = self.get(&key).await {
                tracing::debug!(%key, "cache hit after wait");
                Ok(value)
            } else {
                tracing::debug!(%key, "cache miss");
                let fetched = fetcher().await;
                if let Ok(value) = &fetched {
                    self.insert(key.clone(), value.clone()).await;
                }
                fetched
            }
        };

        let mut in_flight = self.in_flight.lock().await;
        // Map plus this caller: nobody else is waiting on the slot
        if Arc::strong_count(&slot) == 2 {
            in_flight.remove(&key);
        }

        result
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of stored entries, expired ones included until looked up
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<V> Clone for MemoCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}
