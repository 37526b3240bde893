use super::categories::CategoryLookup;
use super::dto::{FeedItemResponse, FeedResponse, ImageResponse, PersonalizationResponse};
use super::error::FeedServiceError;
use super::language::filter_images;
use super::pagination::paginate;
use super::selection::{RankedItem, SelectionPolicy, SelectionRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct FeedService {
    selection_policy: Arc<SelectionPolicy>,
    category_lookup: Arc<CategoryLookup>,
}

impl FeedService {
    pub fn new(selection_policy: Arc<SelectionPolicy>, category_lookup: Arc<CategoryLookup>) -> Self {
        Self {
            selection_policy,
            category_lookup,
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Build one page of the content feed
    ///
    /// This operation:
    /// - Picks explicit categories, the caller's interests or the trending ranking
    /// - Counts and fetches with one shared filter
    /// - Narrows images to the requested language after slicing
    ///
    /// Returns the items, pagination metadata and the branch that was taken
    async fn get_feed(&self, request: SelectionRequest) -> Result<FeedResponse, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn get_feed(&self, request: SelectionRequest) -> Result<FeedResponse, FeedServiceError> {
        self.get_feed_at(request, Utc::now()).await
    }
}

impl FeedService {
    /// `get_feed` with an explicit clock
    pub async fn get_feed_at(
        &self,
        request: SelectionRequest,
        now: DateTime<Utc>,
    ) -> Result<FeedResponse, FeedServiceError> {
        let selected = self.selection_policy.select_feed(&request, now).await?;

        let (items, scores): (Vec<_>, Vec<_>) = selected
            .items
            .into_iter()
            .map(|RankedItem { item, trending_score }| (item, trending_score))
            .unzip();
        let items = filter_images(items, request.language);

        let category_ids: Vec<Uuid> = items.iter().map(|item| item.category_id).collect();
        let categories = self.category_lookup.lookup(&category_ids).await?;

        let items = items
            .into_iter()
            .zip(scores)
            .map(|(item, trending_score)| FeedItemResponse {
                id: item.id,
                title: item.title,
                slug: item.slug,
                category: categories.get(&item.category_id).cloned(),
                images: item.images.into_iter().map(ImageResponse::from).collect(),
                sort_order: item.sort_order,
                created_at: item.created_at,
                trending_score,
            })
            .collect();

        Ok(FeedResponse {
            items,
            pagination: paginate(request.page, selected.total_count),
            personalization: PersonalizationResponse::from(&selected.mode),
        })
    }
}
