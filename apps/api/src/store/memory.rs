use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{AnalysisColumns, NewResumeRecord, ResumeRecord, ResumeRevision};
use crate::models::user_stats::UserStats;
use crate::store::{AnalysisStore, WriteOutcome};

/// Process-local store. Used when no database is configured, and in tests.
/// Each stats write is a check-and-set under a single write lock.
#[derive(Default)]
pub struct MemoryStore {
    stats: RwLock<HashMap<Uuid, UserStats>>,
    resumes: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>, AppError> {
        Ok(self.stats.read().await.get(&user_id).cloned())
    }

    async fn write_user_stats(
        &self,
        expected_version: i64,
        next: &UserStats,
    ) -> Result<WriteOutcome, AppError> {
        let mut stats = self.stats.write().await;
        let current_version = stats.get(&next.user_id).map_or(0, |s| s.version);
        if current_version != expected_version {
            return Ok(WriteOutcome::Conflict);
        }

        let mut committed = next.clone();
        committed.version = expected_version + 1;
        stats.insert(next.user_id, committed);
        Ok(WriteOutcome::Committed)
    }

    async fn create_resume_record(
        &self,
        record: NewResumeRecord,
    ) -> Result<ResumeRecord, AppError> {
        let record = record
            .into_record(Utc::now())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;
        self.resumes.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_resume_record(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self.resumes.read().await.get(&id).cloned())
    }

    async fn list_resume_records(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let mut records: Vec<ResumeRecord> = self
            .resumes
            .read()
            .await
            .values()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn set_optimized_content(
        &self,
        id: Uuid,
        content: &str,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let mut resumes = self.resumes.write().await;
        Ok(resumes.get_mut(&id).map(|record| {
            record.optimized_content = Some(content.to_string());
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn update_resume_analysis(
        &self,
        id: Uuid,
        revision: ResumeRevision,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let columns = AnalysisColumns::from_result(&revision.result)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

        let mut resumes = self.resumes.write().await;
        Ok(resumes.get_mut(&id).map(|record| {
            record.original_content = revision.original_content;
            record.optimized_content = None;
            record.industry = revision.industry.as_str().to_string();
            record.ats_score = columns.ats_score;
            record.validity = columns.validity;
            record.analysis = columns.analysis;
            record.suggestions = columns.suggestions;
            record.skills_gap = columns.skills_gap;
            record.updated_at = Utc::now();
            record.clone()
        }))
    }

    async fn delete_resume_record(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.resumes.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::Industry;
    use crate::analysis::validator::validate;

    fn new_record(user_id: Option<Uuid>, score: u8) -> NewResumeRecord {
        NewResumeRecord {
            user_id,
            filename: "resume.txt".to_string(),
            original_content: "5 years Python".to_string(),
            industry: Industry::Technology,
            result: validate(&format!(r#"{{"score": {score}}}"#)),
        }
    }

    #[tokio::test]
    async fn test_first_write_requires_version_zero() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let stats = UserStats::empty(user, Utc::now());

        assert_eq!(
            store.write_user_stats(1, &stats).await.unwrap(),
            WriteOutcome::Conflict
        );
        assert_eq!(
            store.write_user_stats(0, &stats).await.unwrap(),
            WriteOutcome::Committed
        );
        assert_eq!(store.get_user_stats(user).await.unwrap().unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_stale_version_is_rejected() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let stats = UserStats::empty(user, Utc::now());
        store.write_user_stats(0, &stats).await.unwrap();

        // a second writer still holding the version-0 snapshot loses
        assert_eq!(
            store.write_user_stats(0, &stats).await.unwrap(),
            WriteOutcome::Conflict
        );
    }

    #[tokio::test]
    async fn test_resume_records_round_trip() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let record = store.create_resume_record(new_record(Some(user), 72)).await.unwrap();

        assert_eq!(record.ats_score, 72);
        assert_eq!(record.validity, "valid");
        assert_eq!(record.industry, "technology");

        let fetched = store.get_resume_record(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.original_content, "5 years Python");
        assert!(store.get_resume_record(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.create_resume_record(new_record(Some(user), 10)).await.unwrap();
        store.create_resume_record(new_record(Some(user), 20)).await.unwrap();
        store.create_resume_record(new_record(None, 30)).await.unwrap();

        let records = store.list_resume_records(user).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.user_id == Some(user)));
    }

    #[tokio::test]
    async fn test_set_optimized_content() {
        let store = MemoryStore::new();
        let record = store.create_resume_record(new_record(None, 50)).await.unwrap();

        let updated = store
            .set_optimized_content(record.id, "Better resume")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.optimized_content.as_deref(), Some("Better resume"));
        assert!(store
            .set_optimized_content(Uuid::new_v4(), "x")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_resume_analysis_replaces_columns() {
        let store = MemoryStore::new();
        let record = store.create_resume_record(new_record(None, 40)).await.unwrap();
        store.set_optimized_content(record.id, "Old rewrite").await.unwrap();

        let updated = store
            .update_resume_analysis(
                record.id,
                ResumeRevision {
                    original_content: "RN, 5 years ICU".to_string(),
                    industry: Industry::Healthcare,
                    result: validate(r#"{"score": 91}"#),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.ats_score, 91);
        assert_eq!(updated.industry, "healthcare");
        assert_eq!(updated.original_content, "RN, 5 years ICU");
        assert!(updated.optimized_content.is_none());
        assert_eq!(updated.created_at, record.created_at);

        let missing = store
            .update_resume_analysis(
                Uuid::new_v4(),
                ResumeRevision {
                    original_content: "x".to_string(),
                    industry: Industry::Technology,
                    result: validate("{}"),
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_resume_record() {
        let store = MemoryStore::new();
        let record = store.create_resume_record(new_record(None, 50)).await.unwrap();

        assert!(store.delete_resume_record(record.id).await.unwrap());
        assert!(store.get_resume_record(record.id).await.unwrap().is_none());
        assert!(!store.delete_resume_record(record.id).await.unwrap());
    }
}
