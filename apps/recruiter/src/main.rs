mod config;
mod errors;
mod llm_client;
mod models;
mod outreach;
mod pipeline;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::outreach::picker::{RandomPicker, SeededPicker, VariantPicker};
use crate::outreach::{AiOutreach, EnhancedOutreach, OutreachBackend, OutreachGenerator, TemplateOutreach};
use crate::pipeline::catalog::StaticCatalog;
use crate::pipeline::orchestrator::{Collaborators, Pipeline, PipelineSettings, DEFAULT_TOP_N};
use crate::routes::build_router;
use crate::scoring::fit_scoring::FitScorer;
use crate::scoring::reference_sets::ReferenceSets;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter v{}", env!("CARGO_PKG_VERSION"));

    // Scoring vocabularies: stock lists unless a JSON override is configured
    let sets = match &config.reference_sets_path {
        Some(path) => {
            info!("Loading reference sets from {}", path.display());
            ReferenceSets::from_path(path)?
        }
        None => ReferenceSets::default(),
    };
    let scorer = Arc::new(FitScorer::new(sets, config.scoring_weights)?);
    info!("Fit scorer ready: {:?}", scorer.weights());

    // Job and profile source
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            StaticCatalog::from_path(path)?
        }
        None => {
            info!("No CATALOG_PATH set, using the demo catalog");
            StaticCatalog::demo()
        }
    };
    info!(
        "Catalog: {} jobs, {} profiles",
        catalog.jobs.len(),
        catalog.profiles.len()
    );

    let outreach = build_outreach(&config)?;
    info!("Outreach back-end: {}", outreach.backend_name());

    let pipeline = Pipeline::new(
        Collaborators::from_catalog(Arc::new(catalog)),
        scorer.clone(),
        outreach.clone(),
        PipelineSettings {
            max_candidates: config.max_candidates,
            enrich_delay: config.enrich_delay,
            top_n: DEFAULT_TOP_N,
            sender_name: config.sender_name.clone(),
        },
    );

    info!(
        "Pipeline: enrich up to {} profiles, report top {}",
        pipeline.settings().max_candidates,
        pipeline.settings().top_n
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        scorer,
        pipeline: Arc::new(pipeline),
        outreach,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Picks the outreach back-end once. `ai` without an API key falls back to templates.
fn build_outreach(config: &Config) -> Result<Arc<dyn OutreachGenerator>> {
    let picker: Arc<dyn VariantPicker> = match config.outreach_seed {
        Some(seed) => Arc::new(SeededPicker::new(seed)),
        None => Arc::new(RandomPicker),
    };

    let generator: Arc<dyn OutreachGenerator> = match config.outreach_backend {
        OutreachBackend::Template => Arc::new(TemplateOutreach::new(picker)),
        OutreachBackend::Enhanced => Arc::new(EnhancedOutreach::new(picker)),
        OutreachBackend::Ai => match &config.anthropic_api_key {
            Some(key) => {
                let llm = LlmClient::new(key.clone())?;
                info!("LLM client initialized (model: {})", llm_client::MODEL);
                Arc::new(AiOutreach::new(
                    Arc::new(llm),
                    TemplateOutreach::new(picker),
                    config.outreach_delay,
                ))
            }
            None => {
                warn!("OUTREACH_BACKEND=ai but ANTHROPIC_API_KEY is not set, using templates");
                Arc::new(TemplateOutreach::new(picker))
            }
        },
    };

    Ok(generator)
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
