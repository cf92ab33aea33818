//! Persistence for analysis records.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisRecordRow;

/// Record persistence capability. Insert-only plus point lookup; records
/// are immutable, so there is no update operation to implement.
#[async_trait]
pub trait AnalysisRepo: Send + Sync {
    async fn insert(&self, record: &AnalysisRecordRow) -> Result<(), AppError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<AnalysisRecordRow>, AppError>;
}

/// PostgreSQL-backed repository.
pub struct PgAnalysisRepo {
    pool: PgPool,
}

impl PgAnalysisRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepo for PgAnalysisRepo {
    async fn insert(&self, record: &AnalysisRecordRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analyses
                (id, keywords, document_key, content_type, origin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.keywords)
        .bind(&record.document_key)
        .bind(&record.content_type)
        .bind(&record.origin)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<AnalysisRecordRow>, AppError> {
        Ok(
            sqlx::query_as::<_, AnalysisRecordRow>("SELECT * FROM analyses WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}
