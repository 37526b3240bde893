use crate::domain::content::{
    ContentFilter, ContentItem, ContentRepository, ContentSort, Image,
};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

const CONTENT_COLUMNS: &str = "SELECT id, title, slug, category_id, images, sort_order, created_at, is_deleted, is_suspended FROM content_items";

#[derive(Debug, FromRow)]
struct ContentItemRow {
    id: Uuid,
    title: String,
    slug: String,
    category_id: Uuid,
    images: Json<Vec<Image>>,
    sort_order: i32,
    created_at: DateTime<Utc>,
    is_deleted: bool,
    is_suspended: bool,
}

impl From<ContentItemRow> for ContentItem {
    fn from(row: ContentItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            category_id: row.category_id,
            images: row.images.0,
            sort_order: row.sort_order,
            created_at: row.created_at,
            is_deleted: row.is_deleted,
            is_suspended: row.is_suspended,
        }
    }
}

pub struct PgContentRepository {
    pool: Arc<DbPool>,
}

impl PgContentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

/// WHERE clause for a filter; the only place SQL predicates are written
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContentFilter) {
    builder.push(" WHERE is_deleted = FALSE AND is_suspended = FALSE");
    if let Some(ids) = filter.category_ids() {
        builder.push(" AND category_id = ANY(");
        builder.push_bind(ids.to_vec());
        builder.push(")");
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn count(&self, filter: &ContentFilter) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM content_items");
        push_predicate(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    async fn find(
        &self,
        filter: &ContentFilter,
        sort: ContentSort,
        skip: i64,
        limit: Option<i64>,
    ) -> AppResult<Vec<ContentItem>> {
        let pool = self.pool.as_ref();
        let mut builder = QueryBuilder::<Postgres>::new(CONTENT_COLUMNS);
        push_predicate(&mut builder, filter);

        if sort == ContentSort::ManualPriority {
            builder.push(" ORDER BY sort_order ASC, created_at DESC, id ASC");
        }
        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        builder.push(" OFFSET ");
        builder.push_bind(skip);

        let rows = builder
            .build_query_as::<ContentItemRow>()
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(ContentItem::from).collect())
    }
}
