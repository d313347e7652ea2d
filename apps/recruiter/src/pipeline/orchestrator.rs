//! Pipeline orchestrator: sequences job parsing, profile search, enrichment,
//! scoring, outreach and report assembly for one posting.
//!
//! Job and search failures abort the run. Enrichment and outreach failures
//! degrade the affected candidate only; scoring cannot fail.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::catalog::StaticCatalog;
use super::collaborators::{JobFetcher, ProfileEnricher, ProfileSearcher};
use super::jd_parser::parse_posting;
use crate::models::candidate::{CandidateRecord, ProfileSummary};
use crate::models::job::{JobRecord, RawPosting};
use crate::models::outcome::Outcome;
use crate::models::report::{JobDetails, PipelineReport, RankedCandidate};
use crate::outreach::{OutreachGenerator, OutreachResult};
use crate::scoring::fit_scoring::{FitScorer, ScoreBreakdown};

pub const DEFAULT_MAX_CANDIDATES: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_SENDER_NAME: &str = "Recruitment Team";
const DEFAULT_ENRICH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch job '{job_ref}': {reason}")]
    JobFetch { job_ref: String, reason: String },

    #[error("profile search failed: {0}")]
    Search(String),

    #[error("no candidate profiles found for '{}'", job.title)]
    NoProfiles { job: Box<JobRecord> },
}

/// The three outside-world seams the pipeline reads from.
#[derive(Clone)]
pub struct Collaborators {
    pub jobs: Arc<dyn JobFetcher>,
    pub searcher: Arc<dyn ProfileSearcher>,
    pub enricher: Arc<dyn ProfileEnricher>,
}

impl Collaborators {
    pub fn from_catalog(catalog: Arc<StaticCatalog>) -> Self {
        Self {
            jobs: catalog.clone(),
            searcher: catalog.clone(),
            enricher: catalog,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Search hits beyond this many are not enriched, scored or contacted.
    pub max_candidates: usize,
    pub enrich_delay: Duration,
    pub top_n: usize,
    pub sender_name: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            enrich_delay: DEFAULT_ENRICH_DELAY,
            top_n: DEFAULT_TOP_N,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
        }
    }
}

/// Where the posting comes from.
#[derive(Debug, Clone)]
pub enum JobSource {
    Reference(String),
    Posting(RawPosting),
}

/// Per-run overrides of `PipelineSettings`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub max_candidates: Option<usize>,
    pub sender_name: Option<String>,
}

struct ScoredCandidate {
    record: CandidateRecord,
    breakdown: ScoreBreakdown,
    enrichment_fallback: Option<String>,
}

pub struct Pipeline {
    collaborators: Collaborators,
    scorer: Arc<FitScorer>,
    outreach: Arc<dyn OutreachGenerator>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        collaborators: Collaborators,
        scorer: Arc<FitScorer>,
        outreach: Arc<dyn OutreachGenerator>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            collaborators,
            scorer,
            outreach,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs every stage for one posting and assembles the report.
    pub async fn run(&self, source: JobSource, options: RunOptions) -> Result<PipelineReport, PipelineError> {
        let max_candidates = options.max_candidates.unwrap_or(self.settings.max_candidates);
        let sender_name = options
            .sender_name
            .unwrap_or_else(|| self.settings.sender_name.clone());

        info!("Step 1: Parsing job posting...");
        let job = self.parse_job(source).await?;
        info!("Job: {} at {} ({})", job.title, job.company, job.location);

        info!("Step 2: Searching for candidate profiles...");
        let profiles = self.search(&job).await?;
        info!("Found {} unique profiles", profiles.len());

        info!("Step 3: Enriching up to {max_candidates} profiles...");
        let limit = max_candidates.min(profiles.len());
        let enriched = self.enrich(&profiles[..limit]).await;

        info!("Step 4: Scoring {} candidates...", enriched.len());
        let scored = self.score_all(enriched, &job);

        info!("Step 5: Generating outreach messages...");
        let records: Vec<CandidateRecord> = scored.iter().map(|s| s.record.clone()).collect();
        let messages = self.outreach.generate_all(&records, &job, &sender_name).await;

        info!("Step 6: Formatting report...");
        Ok(self.format_report(&job, scored, messages))
    }

    async fn parse_job(&self, source: JobSource) -> Result<JobRecord, PipelineError> {
        match source {
            JobSource::Reference(job_ref) => self
                .collaborators
                .jobs
                .fetch_job(&job_ref)
                .await
                .map_err(|e| PipelineError::JobFetch {
                    job_ref,
                    reason: e.to_string(),
                }),
            JobSource::Posting(posting) => {
                Ok(parse_posting(posting, self.scorer.reference_sets()))
            }
        }
    }

    async fn search(&self, job: &JobRecord) -> Result<Vec<ProfileSummary>, PipelineError> {
        let hits = self
            .collaborators
            .searcher
            .search_profiles(job)
            .await
            .map_err(|e| PipelineError::Search(e.to_string()))?;

        let profiles = dedupe_by_url(hits);
        if profiles.is_empty() {
            return Err(PipelineError::NoProfiles {
                job: Box::new(job.clone()),
            });
        }
        Ok(profiles)
    }

    /// Sequential, paced enrichment. A hit that cannot be enriched keeps its
    /// search-result data.
    async fn enrich(&self, profiles: &[ProfileSummary]) -> Vec<Outcome<CandidateRecord>> {
        let mut outcomes = Vec::with_capacity(profiles.len());
        let delay = self.settings.enrich_delay;

        for (i, summary) in profiles.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            info!("Enriching profile {}/{}: {}", i + 1, profiles.len(), summary.url);

            let outcome = match self.collaborators.enricher.enrich_profile(summary).await {
                Ok(Some(record)) => Outcome::success(fill_from_summary(record, summary)),
                Ok(None) => Outcome::degraded(
                    CandidateRecord::from_summary(summary),
                    "no enrichment data available",
                ),
                Err(e) => Outcome::degraded(CandidateRecord::from_summary(summary), e.to_string()),
            };

            if let Some(reason) = outcome.reason() {
                warn!("Using basic profile data for {}: {reason}", summary.url);
            }
            outcomes.push(outcome);
        }

        let degraded = outcomes.iter().filter(|o| o.is_degraded()).count();
        if degraded > 0 {
            warn!("{degraded}/{} profiles kept with search-result data only", outcomes.len());
        }
        outcomes
    }

    /// Scores each candidate once, then sorts by total descending. Ties keep
    /// enrichment order.
    fn score_all(&self, enriched: Vec<Outcome<CandidateRecord>>, job: &JobRecord) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = enriched
            .into_iter()
            .map(|outcome| {
                let (record, enrichment_fallback) = outcome.into_parts();
                let breakdown = self.scorer.score(&record, job);
                ScoredCandidate {
                    record,
                    breakdown,
                    enrichment_fallback,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.breakdown.total.total_cmp(&a.breakdown.total));
        scored
    }

    fn format_report(
        &self,
        job: &JobRecord,
        scored: Vec<ScoredCandidate>,
        messages: Vec<OutreachResult>,
    ) -> PipelineReport {
        let now = Utc::now();
        let candidates_found = scored.len();

        let top_candidates = scored
            .into_iter()
            .zip(messages)
            .take(self.settings.top_n)
            .map(|(candidate, outreach)| {
                let ScoredCandidate {
                    record,
                    breakdown,
                    enrichment_fallback,
                } = candidate;
                RankedCandidate {
                    name: record.name,
                    linkedin_url: record.profile_url,
                    fit_score: breakdown.total,
                    score_breakdown: breakdown.subscores,
                    grade: breakdown.grade,
                    recommendation: breakdown.recommendation,
                    headline: record.headline,
                    location: record.location,
                    education: record.education,
                    experience: record.experience,
                    skills: record.skills,
                    outreach_message: outreach.message,
                    message_source: outreach.provenance,
                    outreach_fallback_reason: outreach.fallback_reason,
                    enrichment_fallback_reason: enrichment_fallback,
                    processed_at: now,
                }
            })
            .collect();

        PipelineReport {
            run_id: Uuid::new_v4(),
            job_id: generate_job_id(job, now.timestamp()),
            candidates_found,
            job_details: JobDetails::from(job),
            top_candidates,
            processed_at: now,
        }
    }
}

/// Enriched records may omit identity fields the search hit already had.
fn fill_from_summary(mut record: CandidateRecord, summary: &ProfileSummary) -> CandidateRecord {
    if record.profile_url.is_empty() {
        record.profile_url = summary.url.clone();
    }
    if record.name.is_empty() {
        record.name = summary.name.clone();
    }
    if record.headline.is_empty() {
        record.headline = summary.headline.clone();
    }
    if record.location.is_empty() {
        record.location = summary.location.clone();
    }
    record
}

/// Drops repeated URLs, keeping the first occurrence. Hits without a URL are
/// kept as-is.
pub fn dedupe_by_url(profiles: Vec<ProfileSummary>) -> Vec<ProfileSummary> {
    let mut seen: Vec<String> = Vec::with_capacity(profiles.len());
    profiles
        .into_iter()
        .filter(|p| {
            if p.url.is_empty() {
                return true;
            }
            if seen.contains(&p.url) {
                false
            } else {
                seen.push(p.url.clone());
                true
            }
        })
        .collect()
}

/// Synthetic report id: `{title}-{company}-{location}-{unix_seconds}`, slugged.
pub fn generate_job_id(job: &JobRecord, timestamp: i64) -> String {
    let joined = [&job.title, &job.company, &job.location]
        .iter()
        .map(|part| {
            part.to_lowercase()
                .replace(',', "")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("-");

    let mut slug = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("job-{timestamp}")
    } else {
        format!("{slug}-{timestamp}")
    }
}
