use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Language an image's embedded text is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLanguage {
    English,
    Hindi,
}

impl ImageLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageLanguage::English => "english",
            ImageLanguage::Hindi => "hindi",
        }
    }
}

impl std::fmt::Display for ImageLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(ImageLanguage::English),
            "hindi" => Ok(ImageLanguage::Hindi),
            other => Err(format!(
                "Unsupported language '{}', expected 'english' or 'hindi'",
                other
            )),
        }
    }
}

/// An already-stored image attached to a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    pub language: ImageLanguage,
}

/// A banner in the sub-category library
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category_id: Uuid,
    pub images: Vec<Image>,
    /// Admin-assigned priority, lower values are promoted
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub is_suspended: bool,
}

impl ContentItem {
    /// Soft-deleted and suspended items never take part in selection
    pub fn is_active(&self) -> bool {
        !self.is_deleted && !self.is_suspended
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}
