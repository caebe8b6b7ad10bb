//! Stats Aggregator — folds analysis events into the per-user rollup.
//!
//! `fold_score` and `fold_optimization` are pure. `update_user_stats` is the
//! read-modify-write loop against the store: it commits through a
//! compare-and-swap on `UserStats::version` and re-reads on conflict, so two
//! folds of the same snapshot can never both land.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user_stats::UserStats;
use crate::store::{AnalysisStore, WriteOutcome};

/// Folds one score into the running average.
///
/// `avg' = round((avg * count + score) / (count + 1))`, rounding halves up,
/// in integer arithmetic. A zero count takes the score as-is.
pub fn fold_score(stats: &UserStats, new_score: u8, now: DateTime<Utc>) -> UserStats {
    let count = i64::from(stats.resumes_analyzed.max(0));
    let score = i64::from(new_score);
    let next_count = count + 1;

    let avg = if count == 0 {
        score
    } else {
        let total = i64::from(stats.avg_score) * count + score;
        (2 * total + next_count) / (2 * next_count)
    };

    UserStats {
        resumes_analyzed: i32::try_from(next_count).unwrap_or(i32::MAX),
        avg_score: i32::try_from(avg.clamp(0, 100)).unwrap_or(0),
        last_activity_at: now,
        ..stats.clone()
    }
}

/// Counts one optimization. Leaves the score rollup untouched.
pub fn fold_optimization(stats: &UserStats, now: DateTime<Utc>) -> UserStats {
    UserStats {
        total_optimizations: stats.total_optimizations.max(0).saturating_add(1),
        last_activity_at: now,
        ..stats.clone()
    }
}

/// Applies `fold` to the user's current stats and commits it atomically.
///
/// Makes at most `1 + retry_budget` attempts. Each conflict re-reads the
/// latest snapshot before folding again. Exhausting the budget is reported as
/// `AppError::StatsConflict`; nothing partial is ever written.
pub async fn update_user_stats<F>(
    store: &dyn AnalysisStore,
    user_id: Uuid,
    retry_budget: u32,
    fold: F,
) -> Result<UserStats, AppError>
where
    F: Fn(&UserStats) -> UserStats + Send + Sync,
{
    for attempt in 0..=retry_budget {
        if attempt > 0 {
            tokio::task::yield_now().await;
        }

        let current = store
            .get_user_stats(user_id)
            .await?
            .unwrap_or_else(|| UserStats::empty(user_id, Utc::now()));
        let expected_version = current.version;
        let next = fold(&current);

        match store.write_user_stats(expected_version, &next).await? {
            WriteOutcome::Committed => {
                info!(
                    "Stats for user {} committed at version {} (analyzed={}, avg={}, optimizations={})",
                    user_id,
                    expected_version + 1,
                    next.resumes_analyzed,
                    next.avg_score,
                    next.total_optimizations
                );
                return Ok(UserStats {
                    version: expected_version + 1,
                    ..next
                });
            }
            WriteOutcome::Conflict => {
                warn!(
                    "Stats write conflict for user {} (attempt {}/{}), retrying",
                    user_id,
                    attempt + 1,
                    retry_budget + 1
                );
            }
        }
    }

    Err(AppError::StatsConflict(format!(
        "stats for user {user_id} kept changing after {} attempts",
        retry_budget + 1
    )))
}
