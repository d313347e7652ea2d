//! Report export: pretty JSON on disk plus a digest in the logs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::report::PipelineReport;

const PREVIEW_CHARS: usize = 100;

/// Writes `candidate_search_{job_id}.json` into `dir`, creating it if needed.
pub async fn export_report(report: &PipelineReport, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(format!("candidate_search_{}.json", file_safe(&report.job_id)));
    let body = serde_json::to_vec_pretty(report).context("Failed to serialize report")?;

    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    info!("Report exported to {}", path.display());
    Ok(path)
}

/// Job ids are slugs already, but titles may carry path separators.
fn file_safe(job_id: &str) -> String {
    job_id
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect()
}

/// Logs the console digest of a run: job, counts, then one block per top candidate.
pub fn log_summary(report: &PipelineReport) {
    let job = &report.job_details;
    info!("Job ID: {}", report.job_id);
    info!("Position: {} at {} ({})", job.title, job.company, job.location);
    info!(
        "Candidates found: {}, reporting top {}",
        report.candidates_found,
        report.top_candidates.len()
    );

    for (rank, candidate) in report.top_candidates.iter().enumerate() {
        info!(
            "#{} {} | fit {:.2} | {} | {} | {}",
            rank + 1,
            candidate.name,
            candidate.fit_score,
            candidate.grade,
            candidate.recommendation,
            candidate.linkedin_url
        );
        info!(
            "   [{}] {}",
            candidate.message_source,
            preview(&candidate.outreach_message)
        );
    }
}

fn preview(message: &str) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRecord;
    use crate::models::report::JobDetails;
    use chrono::Utc;
    use uuid::Uuid;

    fn report(job_id: &str) -> PipelineReport {
        PipelineReport {
            run_id: Uuid::new_v4(),
            job_id: job_id.to_string(),
            candidates_found: 0,
            job_details: JobDetails::from(&JobRecord::default()),
            top_candidates: vec![],
            processed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");

        let path = export_report(&report("backend-acme-1700000000"), &target).await.unwrap();

        assert_eq!(path, target.join("candidate_search_backend-acme-1700000000.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"job_id\": \"backend-acme-1700000000\""));
        let parsed: PipelineReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.candidates_found, 0);
    }

    #[tokio::test]
    async fn test_export_sanitizes_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report(&report("ci/cd-lead-1"), dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "candidate_search_ci_cd-lead-1.json");
    }

    #[test]
    fn test_preview_truncates_and_flattens() {
        assert_eq!(preview("Hi Ann,\n\nThanks"), "Hi Ann, Thanks");
        let long = "word ".repeat(40);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }
}
