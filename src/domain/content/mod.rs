use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

pub mod filter;
pub mod model;

pub use filter::{ContentFilter, ContentSort};
pub use model::{Category, ContentItem, Image, ImageLanguage};

/// Read access to content items
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn count(&self, filter: &ContentFilter) -> AppResult<i64>;

    /// `limit: None` fetches every matching row from `skip` onwards
    async fn find(
        &self,
        filter: &ContentFilter,
        sort: ContentSort,
        skip: i64,
        limit: Option<i64>,
    ) -> AppResult<Vec<ContentItem>>;
}

/// Read access to categories, used to denormalize `{id, title, slug}` onto items
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Category>>;
}

/// Read access to externally maintained interest profiles
#[async_trait]
pub trait UserInterestRepository: Send + Sync {
    async fn find_category_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;
}
