use crate::domain::content::UserInterestRepository;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PgUserInterestRepository {
    pool: Arc<DbPool>,
}

impl PgUserInterestRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInterestRepository for PgUserInterestRepository {
    /// Category ids the user declared interest in, empty when no profile exists
    async fn find_category_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let pool = self.pool.as_ref();
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT category_id
            FROM user_interests
            WHERE user_id = $1
            ORDER BY category_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }
}
