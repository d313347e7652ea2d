use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::{EducationEntry, ExperienceEntry};
use crate::models::job::JobRecord;
use crate::outreach::Provenance;
use crate::scoring::fit_scoring::{Grade, Recommendation, SubScores};

/// Job snapshot carried in the exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetails {
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
}

impl From<&JobRecord> for JobDetails {
    fn from(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            skills: job.skills.clone(),
            requirements: job.requirements.clone(),
        }
    }
}

/// One scored candidate with its outreach draft, as exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub name: String,
    pub linkedin_url: String,
    pub fit_score: f64,
    pub score_breakdown: SubScores,
    pub grade: Grade,
    pub recommendation: Recommendation,
    pub headline: String,
    pub location: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub outreach_message: String,
    pub message_source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outreach_fallback_reason: Option<String>,
    /// Set when enrichment failed and only search-result data was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment_fallback_reason: Option<String>,
    pub processed_at: DateTime<Utc>,
}

/// Final pipeline output. Assembled once, exported, then dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub job_id: String,
    /// Every candidate that was scored, not just the ones in `top_candidates`.
    pub candidates_found: usize,
    pub job_details: JobDetails,
    pub top_candidates: Vec<RankedCandidate>,
    pub processed_at: DateTime<Utc>,
}
