//! TTL cache for the listings directory.
//!
//! Holds at most one directory. The slot is guarded by an async mutex that is
//! held across the load, so concurrent callers wait for the first load rather
//! than issuing their own.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio::sync::Mutex;

use crate::errors::MarketDataError;
use crate::models::ListingDirectory;

struct CachedDirectory {
    directory: Arc<ListingDirectory>,
    loaded_at: Instant,
}

pub struct ListingsCache {
    ttl: Duration,
    slot: Mutex<Option<CachedDirectory>>,
}

impl ListingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached directory, loading it with `load` when missing or
    /// expired. A failed load leaves the slot untouched.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<ListingDirectory>, MarketDataError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ListingDirectory, MarketDataError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.directory));
            }
        }

        let directory = Arc::new(load().await?);
        info!("Loaded {} option listings", directory.len());

        *slot = Some(CachedDirectory {
            directory: Arc::clone(&directory),
            loaded_at: Instant::now(),
        });
        Ok(directory)
    }

    /// Seed the cache with an already-built directory.
    pub async fn insert(&self, directory: ListingDirectory) {
        *self.slot.lock().await = Some(CachedDirectory {
            directory: Arc::new(directory),
            loaded_at: Instant::now(),
        });
    }

    /// Drop the cached directory; the next lookup reloads it.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// True when a directory is cached and still within its TTL.
    pub async fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|c| c.loaded_at.elapsed() < self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::Listing;

    fn directory() -> ListingDirectory {
        ListingDirectory::from_listings(vec![Listing {
            option_root: "RY".to_string(),
            underlying_symbol: "RY".to_string(),
            underlying_name: None,
        }])
    }

    #[tokio::test]
    async fn test_loads_once_within_ttl() {
        let cache = ListingsCache::new(Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let dir = cache
                .get_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(directory())
                })
                .await
                .unwrap();
            assert!(dir.contains("RY"));
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_load() {
        let cache = Arc::new(ListingsCache::new(Duration::from_secs(60)));
        let loads = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let loads = Arc::clone(&loads);
                tokio::spawn(async move {
                    cache
                        .get_or_load(|| async move {
                            loads.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok(directory())
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            let dir = handle.await.unwrap().unwrap();
            assert!(dir.contains("RY"));
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_reloads() {
        let cache = ListingsCache::new(Duration::ZERO);
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_load(|| async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(directory())
                })
                .await
                .unwrap();
        }

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let cache = ListingsCache::new(Duration::from_secs(60));
        cache.insert(directory()).await;
        assert!(cache.is_loaded().await);

        cache.invalidate().await;
        assert!(!cache.is_loaded().await);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = ListingsCache::new(Duration::from_secs(60));

        let result = cache
            .get_or_load(|| async { Err(MarketDataError::upstream("listings", "boom")) })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_loaded().await);
    }
}
