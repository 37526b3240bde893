use super::error::FeedServiceError;
use super::interests::UserIdentity;
use super::pagination::{PageRequest, PaginationMeta};
use super::selection::{CategorySelection, FallbackReason, SelectionMode, SelectionRequest};
use crate::domain::content::{Category, Image, ImageLanguage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string of `GET /api/content/feed`. Values are kept as raw strings so
/// malformed input surfaces as a validation error with a useful message.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub categories: Option<String>, // Comma-separated
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl FeedQuery {
    pub fn into_request(
        self,
        user: Option<UserIdentity>,
        default_limit: i64,
    ) -> Result<SelectionRequest, FeedServiceError> {
        let multiple = match non_blank(self.categories.as_deref()) {
            Some(raw) => parse_category_list(raw)?,
            None => Vec::new(),
        };
        let single = non_blank(self.category.as_deref())
            .map(parse_category_id)
            .transpose()?;

        let categories = match (multiple.is_empty(), single) {
            (false, _) => CategorySelection::Multiple(multiple),
            (true, Some(id)) => CategorySelection::Single(id),
            (true, None) => CategorySelection::None,
        };

        let page = parse_positive(self.page.as_deref(), "page", 1)?;
        let limit = parse_positive(self.limit.as_deref(), "limit", default_limit)?;

        let language = non_blank(self.language.as_deref())
            .map(|raw| raw.parse::<ImageLanguage>())
            .transpose()
            .map_err(FeedServiceError::Invalid)?;

        Ok(SelectionRequest {
            user,
            categories,
            page: PageRequest::new(page, limit)?,
            language,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_category_id(raw: &str) -> Result<Uuid, FeedServiceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| FeedServiceError::Invalid(format!("Invalid category id '{}'", raw.trim())))
}

/// Blank entries are ignored, duplicates keep their first position
fn parse_category_list(raw: &str) -> Result<Vec<Uuid>, FeedServiceError> {
    let mut ids: Vec<Uuid> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = parse_category_id(part)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn parse_positive(value: Option<&str>, name: &str, default: i64) -> Result<i64, FeedServiceError> {
    match non_blank(value) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| FeedServiceError::Invalid(format!("{} must be a positive integer", name))),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub items: Vec<FeedItemResponse>,
    pub pagination: PaginationMeta,
    pub personalization: PersonalizationResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<Category>,
    pub images: Vec<ImageResponse>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub url: String,
    pub alt_text: String,
    pub language: ImageLanguage,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
            language: image.language,
        }
    }
}

/// Wire view of the branch taken by the fallback chain
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationResponse {
    pub is_personalized: bool,
    pub filter_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_categories: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl From<&SelectionMode> for PersonalizationResponse {
    fn from(mode: &SelectionMode) -> Self {
        match mode {
            SelectionMode::ExplicitCategory(_) => Self {
                is_personalized: false,
                filter_type: "category",
                interest_categories: None,
                fallback_reason: None,
            },
            SelectionMode::ExplicitCategories(_) => Self {
                is_personalized: false,
                filter_type: "categories",
                interest_categories: None,
                fallback_reason: None,
            },
            SelectionMode::Personalized {
                interest_category_ids,
            } => Self {
                is_personalized: true,
                filter_type: "user_interests",
                interest_categories: Some(interest_category_ids.clone()),
                fallback_reason: None,
            },
            SelectionMode::TrendingFallback { reason } => Self {
                is_personalized: false,
                filter_type: "trending",
                interest_categories: None,
                fallback_reason: Some(*reason),
            },
        }
    }
}
