//! Axum route handlers for the Pipeline API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::models::job::{JobRecord, RawPosting};
use crate::models::report::PipelineReport;
use crate::outreach::OutreachResult;
use crate::pipeline::export::{export_report, log_summary};
use crate::pipeline::orchestrator::{JobSource, RunOptions};
use crate::scoring::fit_scoring::ScoreBreakdown;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one of `job_ref` and `posting` must be set.
#[derive(Debug, Deserialize)]
pub struct RunPipelineRequest {
    pub job_ref: Option<String>,
    pub posting: Option<RawPosting>,
    pub max_candidates: Option<usize>,
    pub sender_name: Option<String>,
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Serialize)]
pub struct RunPipelineResponse {
    #[serde(flatten)]
    pub report: PipelineReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreCandidateRequest {
    pub candidate: CandidateRecord,
    pub job: JobRecord,
}

#[derive(Debug, Deserialize)]
pub struct OutreachPreviewRequest {
    pub candidate: CandidateRecord,
    pub job: JobRecord,
    pub sender_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/pipeline/run
///
/// Runs the full pipeline for a catalog job reference or an inline posting.
/// Optionally exports the report to EXPORT_DIR.
pub async fn handle_run_pipeline(
    State(state): State<AppState>,
    Json(request): Json<RunPipelineRequest>,
) -> Result<Json<RunPipelineResponse>, AppError> {
    let source = match (request.job_ref, request.posting) {
        (Some(job_ref), None) if !job_ref.trim().is_empty() => JobSource::Reference(job_ref),
        (None, Some(posting)) if !posting.title.trim().is_empty() => JobSource::Posting(posting),
        (None, Some(_)) => {
            return Err(AppError::Validation("posting.title cannot be empty".to_string()))
        }
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "provide either job_ref or posting, not both".to_string(),
            ))
        }
        _ => {
            return Err(AppError::Validation(
                "one of job_ref or posting is required".to_string(),
            ))
        }
    };

    if request.max_candidates == Some(0) {
        return Err(AppError::Validation("max_candidates must be at least 1".to_string()));
    }

    let options = RunOptions {
        max_candidates: request.max_candidates,
        sender_name: request.sender_name.filter(|s| !s.trim().is_empty()),
    };

    let report = state.pipeline.run(source, options).await?;
    log_summary(&report);

    let export_path = if request.export {
        let path = export_report(&report, &state.config.export_dir).await?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(Json(RunPipelineResponse { report, export_path }))
}

/// POST /api/v1/candidates/score
///
/// Scores one candidate against one job without running the pipeline.
pub async fn handle_score_candidate(
    State(state): State<AppState>,
    Json(request): Json<ScoreCandidateRequest>,
) -> Json<ScoreBreakdown> {
    Json(state.scorer.score(&request.candidate, &request.job))
}

/// POST /api/v1/outreach/preview
///
/// Drafts one message with the configured back-end.
pub async fn handle_outreach_preview(
    State(state): State<AppState>,
    Json(request): Json<OutreachPreviewRequest>,
) -> Json<OutreachResult> {
    let sender_name = request
        .sender_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| state.config.sender_name.clone());

    let outcome = state
        .outreach
        .generate(&request.candidate, &request.job, &sender_name)
        .await;

    Json(OutreachResult::from_outcome(&request.candidate, outcome))
}
