use crate::cache::{KVCache, lru::MemoryCache};
use common::error::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use faststr::FastStr;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::broadcast::{self, Sender, error::RecvError};
use tracing::{debug, warn};

type PendingMap<V> = Arc<DashMap<FastStr, Sender<Result<V>>>>;

/// Cached access to remotely fetched resources.
///
/// `load_resource` serves from the cache when it can. Otherwise concurrent
/// callers for the same key share a single fetch: the first caller runs it,
/// the rest wait for its outcome. Only successful results are cached, and
/// nothing is ever evicted unless the cache itself is configured to.
pub struct RemoteResourceAccessor<V, C = MemoryCache<V>> {
    cache:   C,
    pending: PendingMap<V>,
    _value:  PhantomData<fn() -> V>,
}

impl<V, C: Clone> Clone for RemoteResourceAccessor<V, C> {
    fn clone(&self) -> Self {
        Self {
            cache:   self.cache.clone(),
            pending: self.pending.clone(),
            _value:  PhantomData,
        }
    }
}

impl<V, C> Default for RemoteResourceAccessor<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: KVCache<V>,
{
    fn default() -> Self {
        Self::new(C::init())
    }
}

// Removes the pending entry even when the leading fetch is dropped midway,
// so waiters observe a closed channel instead of hanging.
struct PendingGuard<'a, V> {
    pending: &'a DashMap<FastStr, Sender<Result<V>>>,
    key:     &'a str,
}

impl<V> Drop for PendingGuard<'_, V> {
    fn drop(&mut self) {
        self.pending.remove(self.key);
    }
}

impl<V, C> RemoteResourceAccessor<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: KVCache<V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            pending: Arc::new(DashMap::new()),
            _value: PhantomData,
        }
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    pub async fn cache_resource(&self, key: &str, value: V) {
        self.cache.set(key, value).await;
    }

    pub async fn cached(&self, key: &str) -> Option<V> {
        self.cache.get(key).await
    }

    /// Runs `fetch` unconditionally. The result is not cached.
    pub async fn fetch_resource<F, Fut>(&self, key: &str, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send,
    {
        debug!(key, "fetching resource");
        let result = fetch().await;
        if let Err(e) = &result {
            warn!(key, error = %e, "failed to fetch resource");
        }
        result
    }

    pub async fn load_resource<F, Fut>(&self, key: &str, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send,
    {
        if let Some(value) = self.cache.get(key).await {
            debug!(key, "resource served from cache");
            return Ok(value);
        }

        let tx = loop {
            let mut rx = match self.pending.entry(FastStr::new(key)) {
                Entry::Occupied(occupied) => occupied.get().subscribe(),
                Entry::Vacant(vacant) => {
                    if !self.cache.contains(key) {
                        let (tx, _) = broadcast::channel(1);
                        vacant.insert(tx.clone());
                        break tx;
                    }
                    // a fetch finished between the cache miss and here
                    drop(vacant);
                    match self.cache.get(key).await {
                        Some(value) => return Ok(value),
                        None => continue,
                    }
                }
            };

            debug!(key, "joining in-flight request");
            match rx.recv().await {
                Ok(result) => return result,
                // the leading caller went away before finishing; start over
                Err(RecvError::Closed) | Err(RecvError::Lagged(_)) => {
                    if let Some(value) = self.cache.get(key).await {
                        return Ok(value);
                    }
                }
            }
        };

        let guard = PendingGuard {
            pending: &self.pending,
            key,
        };
        let result = self.fetch_resource(key, fetch).await;
        if let Ok(value) = &result {
            self.cache.set(key, value.clone()).await;
        }
        drop(guard);
        // no subscribers is fine
        let _ = tx.send(result.clone());
        result
    }
}
