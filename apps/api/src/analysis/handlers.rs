use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::optimizer::optimize;
use crate::analysis::pipeline::analyze;
use crate::analysis::stats::{fold_optimization, fold_score, update_user_stats};
use crate::analysis::taxonomy::{keywords_for, Industry};
use crate::errors::AppError;
use crate::models::resume::{NewResumeRecord, ResumeRecord, ResumeRevision};
use crate::models::user_stats::UserStats;
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "resume.txt";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Identifies the caller on record-level routes. Absent means anonymous.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct IndustryEntry {
    pub id: Industry,
    pub keywords: &'static [&'static str],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub user_id: Option<Uuid>,
    pub filename: Option<String>,
    pub resume_text: String,
    pub industry: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub resume_id: Uuid,
    #[serde(flatten)]
    pub result: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stats: Option<UserStats>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizeRequest {
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    pub user_id: Option<Uuid>,
    pub resume_text: String,
    /// Keeps the record's current industry when absent.
    pub industry: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_content: String,
    pub resume: ResumeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stats: Option<UserStats>,
}

/// Owned records are only reachable by their owner; ownerless ones are open.
fn ensure_owner(record: &ResumeRecord, requester: Option<Uuid>) -> Result<(), AppError> {
    match record.user_id {
        Some(owner) if requester != Some(owner) => Err(AppError::Forbidden),
        _ => Ok(()),
    }
}

async fn load_resume(state: &AppState, id: Uuid) -> Result<ResumeRecord, AppError> {
    state
        .store
        .get_resume_record(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// GET /api/v1/industries
pub async fn handle_list_industries() -> Json<Vec<IndustryEntry>> {
    Json(
        Industry::ALL
            .into_iter()
            .map(|id| IndustryEntry {
                id,
                keywords: keywords_for(id),
            })
            .collect(),
    )
}

/// POST /api/v1/resumes/analyze
///
/// The record is persisted before the stats fold, so a fold that exhausts its
/// retry budget still leaves the analysis retrievable.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let industry = Industry::resolve(req.industry.as_deref());
    let request = AnalysisRequest {
        resume_text: req.resume_text,
        industry,
    };
    let result = analyze(state.model.as_ref(), &state.settings, &request).await?;

    let record = state
        .store
        .create_resume_record(NewResumeRecord {
            user_id: req.user_id,
            filename: req
                .filename
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            original_content: request.resume_text,
            industry,
            result: result.clone(),
        })
        .await?;
    info!("Stored resume analysis {} (score={})", record.id, record.ats_score);

    let user_stats = match req.user_id {
        Some(user_id) => {
            let score = result.score;
            Some(
                update_user_stats(
                    state.store.as_ref(),
                    user_id,
                    state.stats_retry_budget,
                    move |s| fold_score(s, score, Utc::now()),
                )
                .await?,
            )
        }
        None => None,
    };

    Ok(Json(AnalyzeResponse {
        resume_id: record.id,
        result,
        user_stats,
    }))
}

/// GET /api/v1/resumes?userId=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let records = state.store.list_resume_records(params.user_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/resumes/:id?userId=
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RequesterQuery>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = load_resume(&state, id).await?;
    ensure_owner(&record, params.user_id)?;
    Ok(Json(record))
}

/// PATCH /api/v1/resumes/:id
///
/// Re-analyzes updated content and replaces the stored analysis. Stats are
/// left alone: the resume was already counted when it was first analyzed.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = load_resume(&state, id).await?;
    ensure_owner(&record, req.user_id)?;

    let industry =
        Industry::resolve(req.industry.as_deref().or(Some(record.industry.as_str())));
    let request = AnalysisRequest {
        resume_text: req.resume_text,
        industry,
    };
    let result = analyze(state.model.as_ref(), &state.settings, &request).await?;

    let updated = state
        .store
        .update_resume_analysis(
            id,
            ResumeRevision {
                original_content: request.resume_text,
                industry,
                result,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    info!("Re-analyzed resume {} (score={})", id, updated.ats_score);

    Ok(Json(updated))
}

/// DELETE /api/v1/resumes/:id?userId=
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RequesterQuery>,
) -> Result<StatusCode, AppError> {
    let record = load_resume(&state, id).await?;
    ensure_owner(&record, params.user_id)?;

    if !state.store.delete_resume_record(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let record = load_resume(&state, id).await?;
    ensure_owner(&record, req.user_id)?;

    let industry = Industry::resolve(Some(&record.industry));
    let optimized = optimize(
        state.model.as_ref(),
        &state.settings,
        &record.original_content,
        &record.suggestions,
        industry,
    )
    .await?;

    let resume = state
        .store
        .set_optimized_content(id, &optimized)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let user_stats = match req.user_id {
        Some(user_id) => Some(
            update_user_stats(
                state.store.as_ref(),
                user_id,
                state.stats_retry_budget,
                |s| fold_optimization(s, Utc::now()),
            )
            .await?,
        ),
        None => None,
    };

    Ok(Json(OptimizeResponse {
        optimized_content: optimized,
        resume,
        user_stats,
    }))
}

/// GET /api/v1/stats?userId=
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserStats>, AppError> {
    let stats = state
        .store
        .get_user_stats(params.user_id)
        .await?
        .unwrap_or_else(|| UserStats::empty(params.user_id, Utc::now()));
    Ok(Json(stats))
}
