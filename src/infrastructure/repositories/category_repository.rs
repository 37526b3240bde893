use crate::domain::content::{Category, CategoryRepository};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PgCategoryRepository {
    pool: Arc<DbPool>,
}

impl PgCategoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Category>> {
        let pool = self.pool.as_ref();
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, slug
            FROM categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
