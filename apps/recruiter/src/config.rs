use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::outreach::OutreachBackend;
use crate::scoring::fit_scoring::ScoringWeights;

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Needed only by the `ai` outreach back-end.
    pub anthropic_api_key: Option<String>,
    pub outreach_backend: OutreachBackend,
    /// Fixed seed for template variant choice. Unset means fresh randomness.
    pub outreach_seed: Option<u64>,
    pub sender_name: String,
    pub max_candidates: usize,
    pub enrich_delay: Duration,
    pub outreach_delay: Duration,
    pub export_dir: PathBuf,
    /// JSON catalog of jobs and profiles. Unset means the built-in demo catalog.
    pub catalog_path: Option<PathBuf>,
    /// JSON override of the scoring vocabularies.
    pub reference_sets_path: Option<PathBuf>,
    /// Six comma-separated weights: education, trajectory, company, skills,
    /// location, tenure.
    pub scoring_weights: ScoringWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let outreach_backend = env_or("OUTREACH_BACKEND", "template")
            .parse::<OutreachBackend>()
            .map_err(|e| anyhow!(e))
            .context("OUTREACH_BACKEND is invalid")?;

        let max_candidates: usize = parse_env("MAX_CANDIDATES", 20)?;
        if max_candidates == 0 {
            return Err(anyhow!("MAX_CANDIDATES must be at least 1"));
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            outreach_backend,
            outreach_seed: optional_env("OUTREACH_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("OUTREACH_SEED must be an unsigned integer")?,
            sender_name: env_or("SENDER_NAME", "Recruitment Team"),
            max_candidates,
            enrich_delay: Duration::from_millis(parse_env("ENRICH_DELAY_MS", 1000)?),
            outreach_delay: Duration::from_millis(parse_env("OUTREACH_DELAY_MS", 500)?),
            export_dir: PathBuf::from(env_or("EXPORT_DIR", "exports")),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            reference_sets_path: optional_env("REFERENCE_SETS_PATH").map(PathBuf::from),
            scoring_weights: match optional_env("SCORING_WEIGHTS") {
                Some(raw) => parse_weights(&raw).context("SCORING_WEIGHTS is invalid")?,
                None => ScoringWeights::default(),
            },
        })
    }
}

fn parse_weights(raw: &str) -> Result<ScoringWeights> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .context("weights must be numbers")?;

    match values.as_slice() {
        &[education, trajectory, company, skills, location, tenure] => Ok(ScoringWeights::new(
            education, trajectory, company, skills, location, tenure,
        )?),
        _ => Err(anyhow!("expected 6 weights, got {}", values.len())),
    }
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
