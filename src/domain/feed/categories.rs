use super::error::FeedServiceError;
use crate::domain::content::{Category, CategoryRepository};
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const CATEGORY_CACHE_CAPACITY: u64 = 1_000;

/// Resolves category ids to `{id, title, slug}` for response denormalization
pub struct CategoryLookup {
    repository: Arc<dyn CategoryRepository>,
    cache: Option<Cache<Uuid, Category>>,
}

impl CategoryLookup {
    /// `cache_ttl: None` disables caching and hits the repository every time
    pub fn new(repository: Arc<dyn CategoryRepository>, cache_ttl: Option<Duration>) -> Self {
        let cache = cache_ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(CATEGORY_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });

        Self { repository, cache }
    }

    /// Categories that no longer exist are simply absent from the map
    pub async fn lookup(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Category>, FeedServiceError> {
        let mut wanted: Vec<Uuid> = ids.to_vec();
        wanted.sort();
        wanted.dedup();

        let mut found = HashMap::with_capacity(wanted.len());
        let mut missing = Vec::new();

        for id in wanted {
            let cached = match &self.cache {
                Some(cache) => cache.get(&id).await,
                None => None,
            };
            match cached {
                Some(category) => {
                    found.insert(id, category);
                }
                None => missing.push(id),
            }
        }

        if missing.is_empty() {
            return Ok(found);
        }

        let loaded = self.repository.find_by_ids(&missing).await?;

        for category in loaded {
            if let Some(cache) = &self.cache {
                cache.insert(category.id, category.clone()).await;
            }
            found.insert(category.id, category);
        }

        Ok(found)
    }
}
