use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{AnalysisColumns, NewResumeRecord, ResumeRecord, ResumeRevision};
use crate::models::user_stats::UserStats;
use crate::store::{AnalysisStore, WriteOutcome};

/// PostgreSQL-backed store.
///
/// Stats writes are a single conditional statement each, so a write either
/// replaces the whole row or touches nothing:
/// - version 0: `INSERT ... ON CONFLICT (user_id) DO NOTHING`
/// - version n: `UPDATE ... WHERE user_id = $1 AND version = n`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgStore {
    async fn get_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, AppError> {
        Ok(
            sqlx::query_as::<_, UserStats>("SELECT * FROM user_stats WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn write_user_stats(
        &self,
        expected_version: i64,
        next: &UserStats,
    ) -> Result<WriteOutcome, AppError> {
        let result = if expected_version == 0 {
            sqlx::query(
                r#"
                INSERT INTO user_stats
                    (user_id, resumes_analyzed, avg_score, total_optimizations,
                     last_activity_at, version)
                VALUES ($1, $2, $3, $4, $5, 1)
                ON CONFLICT (user_id) DO NOTHING
                "#,
            )
            .bind(next.user_id)
            .bind(next.resumes_analyzed)
            .bind(next.avg_score)
            .bind(next.total_optimizations)
            .bind(next.last_activity_at)
            .execute(&self.pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE user_stats
                SET resumes_analyzed = $2,
                    avg_score = $3,
                    total_optimizations = $4,
                    last_activity_at = $5,
                    version = version + 1
                WHERE user_id = $1 AND version = $6
                "#,
            )
            .bind(next.user_id)
            .bind(next.resumes_analyzed)
            .bind(next.avg_score)
            .bind(next.total_optimizations)
            .bind(next.last_activity_at)
            .bind(expected_version)
            .execute(&self.pool)
            .await?
        };

        if result.rows_affected() == 1 {
            Ok(WriteOutcome::Committed)
        } else {
            debug!(
                "Stats write for user {} lost the race at version {}",
                next.user_id, expected_version
            );
            Ok(WriteOutcome::Conflict)
        }
    }

    async fn create_resume_record(
        &self,
        record: NewResumeRecord,
    ) -> Result<ResumeRecord, AppError> {
        let record = record
            .into_record(Utc::now())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes
                (id, user_id, filename, original_content, optimized_content, industry,
                 ats_score, validity, analysis, suggestions, skills_gap, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.filename)
        .bind(&record.original_content)
        .bind(&record.optimized_content)
        .bind(&record.industry)
        .bind(record.ats_score)
        .bind(&record.validity)
        .bind(&record.analysis)
        .bind(&record.suggestions)
        .bind(&record.skills_gap)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_resume_record(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRecord>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_resume_records(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn set_optimized_content(
        &self,
        id: Uuid,
        content: &str,
    ) -> Result<Option<ResumeRecord>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            UPDATE resumes
            SET optimized_content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_resume_analysis(
        &self,
        id: Uuid,
        revision: ResumeRevision,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let columns = AnalysisColumns::from_result(&revision.result)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            UPDATE resumes
            SET original_content = $2,
                optimized_content = NULL,
                industry = $3,
                ats_score = $4,
                validity = $5,
                analysis = $6,
                suggestions = $7,
                skills_gap = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&revision.original_content)
        .bind(revision.industry.as_str())
        .bind(columns.ats_score)
        .bind(&columns.validity)
        .bind(&columns.analysis)
        .bind(&columns.suggestions)
        .bind(&columns.skills_gap)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_resume_record(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
