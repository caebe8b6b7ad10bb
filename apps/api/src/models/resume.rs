use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::taxonomy::Industry;

/// A persisted analysis. `analysis`, `suggestions` and `skills_gap` hold the
/// serialized fields of the `AnalysisResult` that produced the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub filename: String,
    pub original_content: String,
    pub optimized_content: Option<String>,
    pub industry: String,
    pub ats_score: i32,
    pub validity: String,
    pub analysis: Value,
    pub suggestions: Value,
    pub skills_gap: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a `ResumeRecord`.
#[derive(Debug, Clone)]
pub struct NewResumeRecord {
    pub user_id: Option<Uuid>,
    pub filename: String,
    pub original_content: String,
    pub industry: Industry,
    pub result: AnalysisResult,
}

impl NewResumeRecord {
    /// Materializes the row that gets written, stamping id and timestamps.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<ResumeRecord, serde_json::Error> {
        let columns = AnalysisColumns::from_result(&self.result)?;
        Ok(ResumeRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            filename: self.filename,
            original_content: self.original_content,
            optimized_content: None,
            industry: self.industry.as_str().to_string(),
            ats_score: columns.ats_score,
            validity: columns.validity,
            analysis: columns.analysis,
            suggestions: columns.suggestions,
            skills_gap: columns.skills_gap,
            created_at: now,
            updated_at: now,
        })
    }
}

/// The columns an `AnalysisResult` occupies in a `resumes` row.
#[derive(Debug, Clone)]
pub struct AnalysisColumns {
    pub ats_score: i32,
    pub validity: String,
    pub analysis: Value,
    pub suggestions: Value,
    pub skills_gap: Value,
}

impl AnalysisColumns {
    pub fn from_result(result: &AnalysisResult) -> Result<Self, serde_json::Error> {
        let validity = match serde_json::to_value(result.validity)? {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Self {
            ats_score: i32::from(result.score),
            validity,
            analysis: serde_json::to_value(&result.analysis)?,
            suggestions: serde_json::to_value(&result.suggestions)?,
            skills_gap: serde_json::to_value(&result.skills_gap)?,
        })
    }
}

/// A re-analysis of an existing record's content.
#[derive(Debug, Clone)]
pub struct ResumeRevision {
    pub original_content: String,
    pub industry: Industry,
    pub result: AnalysisResult,
}
