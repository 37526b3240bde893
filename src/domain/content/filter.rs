use super::model::ContentItem;
use uuid::Uuid;

/// Predicate shared by the count and the fetch of one feed request.
///
/// Active-only (not deleted, not suspended) is always implied; the only
/// variable part is the optional category restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    category_ids: Option<Vec<Uuid>>,
}

impl ContentFilter {
    /// Every active item, no category restriction
    pub fn all_active() -> Self {
        Self { category_ids: None }
    }

    /// Active items whose category is one of `category_ids`
    pub fn in_categories(category_ids: Vec<Uuid>) -> Self {
        Self {
            category_ids: Some(category_ids),
        }
    }

    pub fn category_ids(&self) -> Option<&[Uuid]> {
        self.category_ids.as_deref()
    }

    /// In-process evaluation of the predicate, mirrors the SQL the repository emits
    #[cfg(test)]
    pub fn matches(&self, item: &ContentItem) -> bool {
        if !item.is_active() {
            return false;
        }
        match &self.category_ids {
            Some(ids) => ids.contains(&item.category_id),
            None => true,
        }
    }
}

/// Ordering applied by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSort {
    /// sort_order ascending, then newest first
    ManualPriority,
    /// No ordering guarantee; the caller ranks the rows itself
    Unordered,
}
