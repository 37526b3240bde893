use super::error::FeedServiceError;
use serde::Serialize;

/// Validated page window of a feed request. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, FeedServiceError> {
        if page < 1 {
            return Err(FeedServiceError::Invalid(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit < 1 {
            return Err(FeedServiceError::Invalid(
                "limit must be a positive integer".to_string(),
            ));
        }
        if (page - 1)
            .checked_mul(limit)
            .and_then(|skip| skip.checked_add(limit))
            .is_none()
        {
            return Err(FeedServiceError::Invalid("page is out of range".to_string()));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of items preceding this page; overflow is rejected in `new`
    pub fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_items: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub limit: i64,
    pub serial_number_start_from: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

/// Pagination metadata for `page` of a result set of `total_count` items.
///
/// Neither `page` nor `limit` is clamped: a page past the end is described
/// as-is (empty items, true totals).
pub fn paginate(request: PageRequest, total_count: i64) -> PaginationMeta {
    let PageRequest { page, limit } = request;
    let total_count = total_count.max(0);
    let total_pages = total_count / limit + i64::from(total_count % limit != 0);
    let has_prev_page = page > 1;
    let has_next_page = page < total_pages;

    PaginationMeta {
        total_items: total_count,
        current_page: page,
        total_pages,
        limit,
        serial_number_start_from: request.skip() + 1,
        has_prev_page,
        has_next_page,
        prev_page: has_prev_page.then(|| page - 1),
        next_page: has_next_page.then(|| page + 1),
    }
}
