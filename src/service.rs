//! News Service
//!
//! Read and write paths for news items. Listings go through the TTL cache;
//! every successful mutation drops the whole `noticias` namespace from it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::cache::{generate_key, CacheStats, CacheStore, KeyParam, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{ListQuery, NewNoticia, Noticia, NoticiaChanges, NoticiaPage};
use crate::store::{NoticiaFilter, NoticiaStore, StoreError};

/// Namespace of every cached listing
pub const CACHE_PREFIX: &str = "noticias";

/// Search value used in the cache key when no search was given
const NO_SEARCH: &str = "all";

// == Noticias Service ==
/// Business operations on news items.
///
/// Cloning is cheap; clones share the store and the cache.
#[derive(Clone)]
pub struct NoticiasService {
    store: Arc<dyn NoticiaStore>,
    cache: SharedCache<NoticiaPage>,
    /// Bumped under the cache write lock on every invalidation
    generation: Arc<AtomicU64>,
}

impl NoticiasService {
    /// Creates a service over `store`, caching listings in `cache`.
    pub fn new(store: Arc<dyn NoticiaStore>, cache: CacheStore<NoticiaPage>) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(cache)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Handle to the listing cache.
    pub fn cache(&self) -> &SharedCache<NoticiaPage> {
        &self.cache
    }

    // == Cache Key ==
    /// Key under which the listing for `query` is cached.
    pub fn list_cache_key(query: &ListQuery) -> String {
        let search = query.search.as_deref().unwrap_or(NO_SEARCH);
        generate_key(
            CACHE_PREFIX,
            [
                ("page", KeyParam::from(query.page)),
                ("limit", KeyParam::from(query.limit)),
                ("search", KeyParam::from(search)),
            ],
        )
    }

    // == Create ==
    pub async fn create(&self, fields: NewNoticia) -> Result<Noticia> {
        let noticia = self
            .store
            .create(fields)
            .await
            .map_err(|e| internal("Failed to create noticia", e))?;

        self.invalidate_listings().await;
        info!(id = noticia.id, "Noticia created");
        Ok(noticia)
    }

    // == Find All ==
    /// Returns one page of news items, newest first.
    ///
    /// A cached page is returned as is, without checking the store. A page
    /// read while a write invalidated the listings is returned but not cached.
    pub async fn find_all(&self, query: &ListQuery) -> Result<Arc<NoticiaPage>> {
        let key = Self::list_cache_key(query);

        let generation = {
            let mut cache = self.cache.write().await;
            if let Some(page) = cache.get(&key) {
                debug!(%key, "Listing cache hit");
                return Ok(page);
            }
            self.generation.load(Ordering::SeqCst)
        };
        debug!(%key, "Listing cache miss");

        let filter = NoticiaFilter {
            search: query.search.clone(),
        };
        let (data, total) = self
            .store
            .find_page(&filter, query.offset(), query.limit)
            .await
            .map_err(|e| internal("Failed to list noticias", e))?;

        let page = Arc::new(NoticiaPage::new(data, total, query.page, query.limit));

        let mut cache = self.cache.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            cache.set(key, Arc::clone(&page), None);
        } else {
            debug!(%key, "Listing changed during read, not caching");
        }
        Ok(page)
    }

    // == Find One ==
    pub async fn find_one(&self, id: i64) -> Result<Noticia> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| internal("Failed to fetch noticia", e))?
            .ok_or_else(|| AppError::NotFound(format!("Noticia with id {} not found", id)))
    }

    // == Update ==
    pub async fn update(&self, id: i64, changes: NoticiaChanges) -> Result<Noticia> {
        let mut noticia = self.find_one(id).await?;
        noticia.apply(changes);

        let saved = self
            .store
            .save(noticia)
            .await
            .map_err(|e| internal("Failed to update noticia", e))?;

        self.invalidate_listings().await;
        info!(id, "Noticia updated");
        Ok(saved)
    }

    // == Remove ==
    pub async fn remove(&self, id: i64) -> Result<()> {
        let noticia = self.find_one(id).await?;

        self.store
            .remove(&noticia)
            .await
            .map_err(|e| internal("Failed to remove noticia", e))?;

        self.invalidate_listings().await;
        info!(id, "Noticia removed");
        Ok(())
    }

    // == Cache Stats ==
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    async fn invalidate_listings(&self) {
        let removed = {
            let mut cache = self.cache.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
            cache.invalidate_by_prefix(CACHE_PREFIX)
        };
        info!(removed, prefix = CACHE_PREFIX, "Listing cache invalidated");
    }
}

/// Logs the store failure and hides it behind a generic message.
fn internal(message: &str, err: StoreError) -> AppError {
    error!(error = %err, "{}", message);
    AppError::Internal(message.to_string())
}
