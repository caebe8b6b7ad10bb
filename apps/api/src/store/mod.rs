//! Storage collaborator — the record store the pipeline persists through.
//!
//! Two backends: `PgStore` (PostgreSQL via sqlx) and `MemoryStore`.
//! `AppState` carries whichever one startup selected as `Arc<dyn AnalysisStore>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResumeRecord, ResumeRecord, ResumeRevision};
use crate::models::user_stats::UserStats;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result of a compare-and-swap stats write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Committed,
    /// Another writer moved the row past `expected_version`; nothing was written.
    Conflict,
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn get_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, AppError>;

    /// Writes `next` only if the stored row is still at `expected_version`
    /// (0 = no row yet). A committed row carries `expected_version + 1`.
    async fn write_user_stats(
        &self,
        expected_version: i64,
        next: &UserStats,
    ) -> Result<WriteOutcome, AppError>;

    async fn create_resume_record(&self, record: NewResumeRecord)
        -> Result<ResumeRecord, AppError>;

    async fn get_resume_record(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError>;

    /// All records owned by a user, newest first.
    async fn list_resume_records(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError>;

    async fn set_optimized_content(
        &self,
        id: Uuid,
        content: &str,
    ) -> Result<Option<ResumeRecord>, AppError>;

    /// Replaces content, industry and every analysis column. The previous
    /// optimized rewrite no longer matches the content and is cleared.
    async fn update_resume_analysis(
        &self,
        id: Uuid,
        revision: ResumeRevision,
    ) -> Result<Option<ResumeRecord>, AppError>;

    /// Returns whether a record was removed.
    async fn delete_resume_record(&self, id: Uuid) -> Result<bool, AppError>;
}
