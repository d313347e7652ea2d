//! Outreach: drafts a first-contact message for each scored candidate.
//!
//! Three back-ends sit behind `OutreachGenerator`:
//! - `TemplateOutreach`: fixed templates per bucket, random variant.
//! - `EnhancedOutreach`: richer templates plus prestige/experience post-edits.
//! - `AiOutreach`: LLM draft, falling back to `TemplateOutreach` on any fault.
//!
//! The back-end is chosen once at startup (`OutreachBackend`) and carried as
//! `Arc<dyn OutreachGenerator>`; the pipeline never knows which one it has.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;
use crate::models::outcome::Outcome;

pub mod ai;
pub mod local;
pub mod picker;
pub mod prompts;
pub mod templates;

pub use ai::AiOutreach;
pub use local::{EnhancedOutreach, TemplateOutreach};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Which path produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Template,
    EnhancedLocal,
    AiPrimary,
    AiFallbackTemplate,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Template => "template",
            Provenance::EnhancedLocal => "enhanced-local",
            Provenance::AiPrimary => "ai-primary",
            Provenance::AiFallbackTemplate => "ai-fallback-template",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachMessage {
    pub message: String,
    pub provenance: Provenance,
}

/// A drafted message tied back to its candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachResult {
    pub candidate_name: String,
    pub profile_url: String,
    pub message: String,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl OutreachResult {
    pub fn from_outcome(candidate: &CandidateRecord, outcome: Outcome<OutreachMessage>) -> Self {
        let (draft, fallback_reason) = outcome.into_parts();
        Self {
            candidate_name: candidate.name.clone(),
            profile_url: candidate.profile_url.clone(),
            message: draft.message,
            provenance: draft.provenance,
            fallback_reason,
        }
    }
}

/// Back-end selector read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutreachBackend {
    Template,
    Enhanced,
    Ai,
}

impl FromStr for OutreachBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "template" | "templates" => Ok(OutreachBackend::Template),
            "enhanced" | "enhanced-local" => Ok(OutreachBackend::Enhanced),
            "ai" | "llm" | "anthropic" => Ok(OutreachBackend::Ai),
            other => Err(format!(
                "unknown outreach backend '{other}' (expected template, enhanced or ai)"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Outreach back-end contract. `generate` never fails: a back-end that cannot
/// produce its preferred draft returns `Outcome::Degraded` with a fallback text.
#[async_trait]
pub trait OutreachGenerator: Send + Sync {
    async fn generate(
        &self,
        candidate: &CandidateRecord,
        job: &JobRecord,
        sender_name: &str,
    ) -> Outcome<OutreachMessage>;

    /// Short label for logs.
    fn backend_name(&self) -> &'static str;

    /// Pause between consecutive calls in `generate_all`.
    fn pacing(&self) -> Duration {
        Duration::ZERO
    }

    /// Drafts a message per candidate, in input order, one result per input.
    async fn generate_all(
        &self,
        candidates: &[CandidateRecord],
        job: &JobRecord,
        sender_name: &str,
    ) -> Vec<OutreachResult> {
        let mut results = Vec::with_capacity(candidates.len());
        let pacing = self.pacing();

        for (i, candidate) in candidates.iter().enumerate() {
            if i > 0 && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }

            info!(
                "Generating {} message {}/{}: {}",
                self.backend_name(),
                i + 1,
                candidates.len(),
                display_name(candidate)
            );

            let outcome = self.generate(candidate, job, sender_name).await;
            debug!(
                "{} draft for {}: {} chars",
                outcome.value().provenance,
                display_name(candidate),
                outcome.value().message.len()
            );
            if let Some(reason) = outcome.reason() {
                warn!(
                    "Outreach for {} degraded to template: {reason}",
                    display_name(candidate)
                );
            }
            results.push(OutreachResult::from_outcome(candidate, outcome));
        }

        results
    }
}

fn display_name(candidate: &CandidateRecord) -> &str {
    if candidate.name.is_empty() {
        "Unknown"
    } else {
        &candidate.name
    }
}
