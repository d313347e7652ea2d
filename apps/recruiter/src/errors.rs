use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::report::JobDetails;
use crate::pipeline::orchestrator::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(e) => {
                tracing::error!("Pipeline aborted: {e}");
                let (status, code) = match e {
                    PipelineError::JobFetch { .. } => (StatusCode::BAD_GATEWAY, "JOB_FETCH_FAILED"),
                    PipelineError::Search(_) => (StatusCode::BAD_GATEWAY, "PROFILE_SEARCH_FAILED"),
                    PipelineError::NoProfiles { .. } => (StatusCode::NOT_FOUND, "NO_PROFILES_FOUND"),
                };
                (status, code, e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        // The parsed job is still useful to the caller when no profiles matched.
        if let AppError::Pipeline(PipelineError::NoProfiles { job }) = &self {
            error["job_details"] = json!(JobDetails::from(job.as_ref()));
        }

        let body = Json(json!({ "error": error }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRecord;

    #[test]
    fn test_pipeline_errors_map_to_statuses() {
        let cases = [
            (
                PipelineError::JobFetch {
                    job_ref: "x".into(),
                    reason: "down".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (PipelineError::Search("down".into()), StatusCode::BAD_GATEWAY),
            (
                PipelineError::NoProfiles {
                    job: Box::new(JobRecord::default()),
                },
                StatusCode::NOT_FOUND,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(AppError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
