use crate::domain::content::ContentItem;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

const IMAGE_WEIGHT: f64 = 2.0;
const RECENCY_WEIGHT: f64 = 7.0;
const SORT_ORDER_WEIGHT: f64 = 0.1;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Trending score of an item at instant `now`:
///
/// `2 * imageCount + 7 / (ageInDays + 1) - 0.1 * sortOrder`
///
/// Age is fractional days. Items stamped after `now` (clock skew) count as
/// age zero so the recency term stays finite.
pub fn score(item: &ContentItem, now: DateTime<Utc>) -> f64 {
    let image_count = item.images.len() as f64;
    let age_in_days = age_in_days(item.created_at, now);
    let sort_order = f64::from(item.sort_order);

    IMAGE_WEIGHT * image_count + RECENCY_WEIGHT / (age_in_days + 1.0)
        - SORT_ORDER_WEIGHT * sort_order
}

fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(created_at).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY).max(0.0)
}

/// Score every item and order them by score descending, newest first on ties
pub fn rank(items: Vec<ContentItem>, now: DateTime<Utc>) -> Vec<(ContentItem, f64)> {
    let mut scored: Vec<(ContentItem, f64)> = items
        .into_iter()
        .map(|item| {
            let s = score(&item, now);
            (item, s)
        })
        .collect();

    scored.sort_by(|(a, score_a), (b, score_b)| compare_ranked(a, *score_a, b, *score_b));
    scored
}

fn compare_ranked(a: &ContentItem, score_a: f64, b: &ContentItem, score_b: f64) -> Ordering {
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
