use std::sync::Arc;

use crate::config::Config;
use crate::outreach::OutreachGenerator;
use crate::pipeline::orchestrator::Pipeline;
use crate::scoring::fit_scoring::FitScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Same scorer the pipeline uses; the score endpoint calls it directly.
    pub scorer: Arc<FitScorer>,
    pub pipeline: Arc<Pipeline>,
    /// Back-end chosen at startup from OUTREACH_BACKEND.
    pub outreach: Arc<dyn OutreachGenerator>,
}
