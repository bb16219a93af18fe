use crate::cache::KVCache;
use faststr::FastStr;
use moka::future::Cache;
use std::{sync::Arc, time::Duration};

#[derive(Clone, Debug, Default)]
pub struct CacheConfig {
    /// `None` means unbounded.
    pub max_capacity: Option<u64>,
    /// `None` means entries live until overwritten or invalidated.
    pub time_to_live: Option<Duration>,
}

pub struct MemoryCache<V>(Arc<Cache<FastStr, V>>);

impl<V> Clone for MemoryCache<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V> Default for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max_capacity) = config.max_capacity {
            builder = builder.max_capacity(max_capacity);
        }
        if let Some(time_to_live) = config.time_to_live {
            builder = builder.time_to_live(time_to_live);
        }
        Self(Arc::new(builder.build()))
    }
}

impl<V> KVCache<V> for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn init() -> Self {
        Self::new()
    }

    fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    async fn get(&self, k: &str) -> Option<V> {
        self.0.get(k).await
    }

    async fn invalidate(&self, k: &str) {
        self.0.invalidate(k).await;
    }

    async fn set(&self, key: &str, value: V) {
        self.0.insert(key.to_owned().into(), value).await;
    }
}
