use axum::{
    extract::{Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::feed::{FeedQuery, FeedResponse, UserIdentity};
use crate::{
    domain::feed::{FeedService, FeedServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct FeedController {
    feed_service: Arc<FeedService>,
    default_page_size: i64,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>, default_page_size: i64) -> Self {
        Self {
            feed_service,
            default_page_size,
        }
    }

    /// GET /api/content/feed - One page of the content feed, anonymous or personalized
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        auth_user: Option<Extension<AuthUser>>,
        Query(query): Query<FeedQuery>,
    ) -> AppResult<Json<FeedResponse>> {
        let user = auth_user.map(|Extension(user)| UserIdentity::new(user.user_id));
        let request = query.into_request(user, controller.default_page_size)?;

        let response = controller.feed_service.get_feed(request).await?;
        Ok(Json(response))
    }
}
