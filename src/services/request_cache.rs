//! services/request_cache.rs
//! Cache en memoria de respuestas de proveedores (moka + TTL).

use std::time::Duration;

use moka::future::Cache;
use sha2::{Digest, Sha256};

const CACHE_CAPACITY: u64 = 1_000;

#[derive(Clone)]
pub struct RequestCache {
    inner: Option<Cache<String, String>>,
}

impl RequestCache {
    pub fn new(enabled: bool, ttl: Duration) -> Self {
        let inner = enabled.then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });
        RequestCache { inner }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        RequestCache { inner: None }
    }

    /// SHA-256 hex de `operation \n model \n prompt`.
    pub fn key(operation: &str, model: &str, prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(operation.as_bytes());
        hasher.update(b"\n");
        hasher.update(model.as_bytes());
        hasher.update(b"\n");
        hasher.update(prompt.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    pub async fn insert(&self, key: String, value: String) {
        if let Some(cache) = &self.inner {
            cache.insert(key, value).await;
        }
    }
}
