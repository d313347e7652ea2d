pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/pipeline/run", post(handlers::handle_run_pipeline))
        .route(
            "/api/v1/candidates/score",
            post(handlers::handle_score_candidate),
        )
        .route(
            "/api/v1/outreach/preview",
            post(handlers::handle_outreach_preview),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::outreach::picker::FixedPicker;
    use crate::outreach::{OutreachBackend, OutreachGenerator, TemplateOutreach};
    use crate::pipeline::catalog::StaticCatalog;
    use crate::pipeline::orchestrator::{Collaborators, Pipeline, PipelineSettings};
    use crate::scoring::fit_scoring::{FitScorer, ScoringWeights};

    fn test_state(export_dir: PathBuf) -> AppState {
        test_state_with(export_dir, StaticCatalog::demo())
    }

    fn test_state_with(export_dir: PathBuf, catalog: StaticCatalog) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            outreach_backend: OutreachBackend::Template,
            outreach_seed: None,
            sender_name: "Talent Team".to_string(),
            max_candidates: 20,
            enrich_delay: Duration::ZERO,
            outreach_delay: Duration::ZERO,
            export_dir,
            catalog_path: None,
            reference_sets_path: None,
            scoring_weights: ScoringWeights::default(),
        };
        let scorer = Arc::new(FitScorer::default());
        let outreach: Arc<dyn OutreachGenerator> =
            Arc::new(TemplateOutreach::new(Arc::new(FixedPicker(0))));
        let pipeline = Pipeline::new(
            Collaborators::from_catalog(Arc::new(catalog)),
            scorer.clone(),
            outreach.clone(),
            PipelineSettings {
                enrich_delay: Duration::ZERO,
                sender_name: config.sender_name.clone(),
                ..Default::default()
            },
        );
        AppState {
            config,
            scorer,
            pipeline: Arc::new(pipeline),
            outreach,
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "recruiter");
        assert_eq!(body["outreach_backend"], "template");
    }

    #[tokio::test]
    async fn test_run_demo_pipeline_with_export() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path().to_path_buf()));

        let (status, body) = post_json(
            app,
            "/api/v1/pipeline/run",
            json!({"job_ref": "demo", "export": true}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidates_found"], 5);
        assert_eq!(body["top_candidates"][0]["name"], "Alice Johnson");
        assert_eq!(body["top_candidates"][0]["message_source"], "template");
        assert!(body["top_candidates"][0]["outreach_message"]
            .as_str()
            .unwrap()
            .ends_with("Talent Team"));

        let export_path = body["export_path"].as_str().unwrap();
        assert!(std::path::Path::new(export_path).exists());
    }

    #[tokio::test]
    async fn test_run_with_unknown_job_is_bad_gateway() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let (status, body) =
            post_json(app, "/api/v1/pipeline/run", json!({"job_ref": "nope"})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "JOB_FETCH_FAILED");
    }

    #[tokio::test]
    async fn test_no_profiles_returns_parsed_job() {
        let mut catalog = StaticCatalog::demo();
        catalog.profiles.clear();
        let app = build_router(test_state_with(PathBuf::from("unused"), catalog));

        let (status, body) =
            post_json(app, "/api/v1/pipeline/run", json!({"job_ref": "demo"})).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NO_PROFILES_FOUND");
        let details = &body["error"]["job_details"];
        assert_eq!(details["title"], "Senior Software Engineer");
        assert_eq!(details["company"], "TechCorp");
        assert_eq!(details["skills"].as_array().unwrap().len(), 6);
        assert_eq!(details["requirements"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_run_with_unknown_job_has_no_job_details() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let (_, body) = post_json(app, "/api/v1/pipeline/run", json!({"job_ref": "nope"})).await;
        assert!(body["error"].get("job_details").is_none());
    }

    #[tokio::test]
    async fn test_run_requires_a_job_source() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let (status, body) = post_json(app.clone(), "/api/v1/pipeline/run", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = post_json(
            app,
            "/api/v1/pipeline/run",
            json!({"job_ref": "demo", "max_candidates": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let (status, body) = post_json(
            app,
            "/api/v1/candidates/score",
            json!({
                "candidate": {"location": "San Francisco, CA", "skills": ["python", "react", "aws"]},
                "job": {"location": "San Francisco, CA", "skills": ["python", "react", "aws"]}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subscores"]["location"], 10.0);
        assert_eq!(body["subscores"]["skills"], 9.5);
    }

    #[tokio::test]
    async fn test_outreach_preview_uses_configured_sender() {
        let app = build_router(test_state(PathBuf::from("unused")));
        let (status, body) = post_json(
            app,
            "/api/v1/outreach/preview",
            json!({
                "candidate": {"name": "Eva Brown", "profile_url": "https://linkedin.com/in/demo5"},
                "job": {"title": "Frontend Engineer", "company": "TechCorp"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidate_name"], "Eva Brown");
        assert_eq!(body["provenance"], "template");
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Hi Eva Brown,"));
        assert!(message.ends_with("Talent Team"));
    }
}
