//! Seams to the outside world: job lookup, profile search and enrichment.
//! Scraping and search-engine plumbing live behind these traits; the service
//! ships `StaticCatalog` as the in-process implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candidate::{CandidateRecord, ProfileSummary};
use crate::models::job::JobRecord;

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("malformed upstream data: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait JobFetcher: Send + Sync {
    async fn fetch_job(&self, job_ref: &str) -> Result<JobRecord, CollaboratorError>;
}

#[async_trait]
pub trait ProfileSearcher: Send + Sync {
    async fn search_profiles(&self, job: &JobRecord) -> Result<Vec<ProfileSummary>, CollaboratorError>;
}

#[async_trait]
pub trait ProfileEnricher: Send + Sync {
    /// `Ok(None)` means the profile exists but nothing beyond the summary is known.
    async fn enrich_profile(
        &self,
        summary: &ProfileSummary,
    ) -> Result<Option<CandidateRecord>, CollaboratorError>;
}
