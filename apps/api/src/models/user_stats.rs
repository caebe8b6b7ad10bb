use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user rollup of analysis activity.
///
/// `version` is the optimistic-concurrency token: every committed write bumps
/// it by one, and 0 means the row has never been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: Uuid,
    pub resumes_analyzed: i32,
    pub avg_score: i32,
    pub total_optimizations: i32,
    pub last_activity_at: DateTime<Utc>,
    pub version: i64,
}

impl UserStats {
    /// Zeroed snapshot for a user with no stats row yet.
    pub fn empty(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            resumes_analyzed: 0,
            avg_score: 0,
            total_optimizations: 0,
            last_activity_at: now,
            version: 0,
        }
    }
}
