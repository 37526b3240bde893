use crate::domain::content::{ContentItem, ImageLanguage};

/// Narrow each item's image list to `language`. Items pass through unchanged
/// when no language is requested; an item may end up with no images.
pub fn filter_images(items: Vec<ContentItem>, language: Option<ImageLanguage>) -> Vec<ContentItem> {
    let Some(language) = language else {
        return items;
    };

    items
        .into_iter()
        .map(|mut item| {
            item.images.retain(|image| image.language == language);
            item
        })
        .collect()
}
