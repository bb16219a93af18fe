mod accessor;
mod cache;

pub use accessor::RemoteResourceAccessor;
pub use cache::KVCache;
pub use cache::lru::{CacheConfig, MemoryCache};
