use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 缓存条目：值与可选的单独过期时间
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

/// 条目带 ttl 时按条目过期，否则使用全局 time_to_live
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _now: Instant) -> Option<Duration> {
        entry.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _now: Instant,
        _current: Option<Duration>,
    ) -> Option<Duration> {
        entry.ttl
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, default_ttl: u64) -> Self {
        if default_ttl == 0 {
            debug!("cache.default_ttl 为 0，未设置 TTL 的条目不会过期");
        }

        let mut builder = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry);
        if default_ttl > 0 {
            builder = builder.time_to_live(Duration::from_secs(default_ttl));
        }

        debug!("Moka 缓存初始化完成，容量上限: {}", max_capacity);
        Self {
            inner: builder.build(),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => {
                debug!("缓存未命中: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = (ttl > 0).then(|| Duration::from_secs(ttl));
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".to_string()));

        cache.remove("k").await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaCacheWrapper::with_settings(100, 60));
        cache.insert_json("n".into(), &vec![1, 2, 3], 30).await;
        let value: Option<Vec<i32>> = cache.get_json("n").await;
        assert_eq!(value, Some(vec![1, 2, 3]));

        cache.insert_raw("bad".into(), "not json".into(), 0).await;
        let broken: Option<Vec<i32>> = cache.get_json("bad").await;
        assert_eq!(broken, None);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
