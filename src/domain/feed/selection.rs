use super::error::FeedServiceError;
use super::interests::{InterestResolver, UserIdentity};
use super::pagination::PageRequest;
use super::trending;
use crate::domain::content::{
    ContentFilter, ContentItem, ContentRepository, ContentSort, ImageLanguage,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Category restriction the caller asked for explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    None,
    Single(Uuid),
    /// Non-empty, duplicates removed
    Multiple(Vec<Uuid>),
}

#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub user: Option<UserIdentity>,
    pub categories: CategorySelection,
    pub page: PageRequest,
    pub language: Option<ImageLanguage>,
}

/// Why a request without explicit categories was served the trending feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    Unauthenticated,
    NoInterests,
    InterestLookupFailed,
}

/// Branch of the fallback chain taken for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    ExplicitCategory(Uuid),
    ExplicitCategories(Vec<Uuid>),
    Personalized { interest_category_ids: Vec<Uuid> },
    TrendingFallback { reason: FallbackReason },
}

impl SelectionMode {
    /// The one predicate used for both counting and fetching
    pub fn filter(&self) -> ContentFilter {
        match self {
            SelectionMode::ExplicitCategory(id) => ContentFilter::in_categories(vec![*id]),
            SelectionMode::ExplicitCategories(ids) => ContentFilter::in_categories(ids.clone()),
            SelectionMode::Personalized {
                interest_category_ids,
            } => ContentFilter::in_categories(interest_category_ids.clone()),
            SelectionMode::TrendingFallback { .. } => ContentFilter::all_active(),
        }
    }

    pub fn is_trending(&self) -> bool {
        matches!(self, SelectionMode::TrendingFallback { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::ExplicitCategory(_) => "explicit_category",
            SelectionMode::ExplicitCategories(_) => "explicit_categories",
            SelectionMode::Personalized { .. } => "personalized",
            SelectionMode::TrendingFallback { .. } => "trending_fallback",
        }
    }
}

/// A selected item; the score is only computed in trending mode
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    pub item: ContentItem,
    pub trending_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SelectedFeed {
    pub items: Vec<RankedItem>,
    pub total_count: i64,
    pub mode: SelectionMode,
}

/// Fallback chain: explicit categories, then the caller's interests, then trending
pub struct SelectionPolicy {
    content_repo: Arc<dyn ContentRepository>,
    interest_resolver: Arc<dyn InterestResolver>,
}

impl SelectionPolicy {
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        interest_resolver: Arc<dyn InterestResolver>,
    ) -> Self {
        Self {
            content_repo,
            interest_resolver,
        }
    }

    pub async fn select_feed(
        &self,
        request: &SelectionRequest,
        now: DateTime<Utc>,
    ) -> Result<SelectedFeed, FeedServiceError> {
        let mode = self.choose_mode(request).await;
        let filter = mode.filter();

        let (items, total_count) = if mode.is_trending() {
            self.fetch_trending(&filter, request.page, now).await?
        } else {
            self.fetch_by_priority(&filter, request.page).await?
        };

        tracing::info!(
            mode = mode.name(),
            total_count,
            page = request.page.page(),
            limit = request.page.limit(),
            returned = items.len(),
            "Feed selected"
        );

        Ok(SelectedFeed {
            items,
            total_count,
            mode,
        })
    }

    async fn choose_mode(&self, request: &SelectionRequest) -> SelectionMode {
        match &request.categories {
            CategorySelection::Multiple(ids) => SelectionMode::ExplicitCategories(ids.clone()),
            CategorySelection::Single(id) => SelectionMode::ExplicitCategory(*id),
            CategorySelection::None => self.personalize(request.user.as_ref()).await,
        }
    }

    /// Resolver failures are never fatal, they degrade to trending
    async fn personalize(&self, user: Option<&UserIdentity>) -> SelectionMode {
        let Some(user) = user else {
            return SelectionMode::TrendingFallback {
                reason: FallbackReason::Unauthenticated,
            };
        };

        match self.interest_resolver.resolve(Some(user)).await {
            Ok(interests) if !interests.is_empty() => SelectionMode::Personalized {
                interest_category_ids: interests.into_iter().collect(),
            },
            Ok(_) => SelectionMode::TrendingFallback {
                reason: FallbackReason::NoInterests,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Interest lookup failed, serving trending feed");
                SelectionMode::TrendingFallback {
                    reason: FallbackReason::InterestLookupFailed,
                }
            }
        }
    }

    /// Counted first so a page past the end never issues the fetch
    async fn fetch_by_priority(
        &self,
        filter: &ContentFilter,
        page: PageRequest,
    ) -> Result<(Vec<RankedItem>, i64), FeedServiceError> {
        let total_count = self.content_repo.count(filter).await?;
        if page.skip() >= total_count {
            return Ok((Vec::new(), total_count));
        }

        let items = self
            .content_repo
            .find(filter, ContentSort::ManualPriority, page.skip(), Some(page.limit()))
            .await?;

        let ranked = items
            .into_iter()
            .map(|item| RankedItem {
                item,
                trending_score: None,
            })
            .collect();

        Ok((ranked, total_count))
    }

    /// Scores depend on `now`, so the whole active set is loaded and ranked
    /// before slicing. The total is the size of that set, so no separate count
    /// is issued.
    ///
    /// Cost grows with the whole library: every trending request reads and
    /// decodes every active row, images included.
    async fn fetch_trending(
        &self,
        filter: &ContentFilter,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<(Vec<RankedItem>, i64), FeedServiceError> {
        let candidates = self
            .content_repo
            .find(filter, ContentSort::Unordered, 0, None)
            .await?;
        let total_count = candidates.len() as i64;

        let ranked = trending::rank(candidates, now)
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .map(|(item, score)| RankedItem {
                item,
                trending_score: Some(score),
            })
            .collect();

        Ok((ranked, total_count))
    }
}
