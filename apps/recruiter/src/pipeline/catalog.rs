//! In-process job/profile source: the demo data set, or a JSON document on disk.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::collaborators::{CollaboratorError, JobFetcher, ProfileEnricher, ProfileSearcher};
use crate::models::candidate::{CandidateRecord, EducationEntry, ExperienceEntry, ProfileSummary};
use crate::models::job::JobRecord;

/// Reference of the built-in demo posting.
pub const DEMO_JOB_REF: &str = "demo";

/// Shape of a catalog file:
/// `{ "jobs": {ref: JobRecord}, "profiles": [ProfileSummary], "enriched": {url: CandidateRecord} }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticCatalog {
    pub jobs: HashMap<String, JobRecord>,
    pub profiles: Vec<ProfileSummary>,
    pub enriched: HashMap<String, CandidateRecord>,
}

impl StaticCatalog {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog JSON in {}", path.display()))
    }

    /// One senior engineering posting and five candidates of mixed fit.
    pub fn demo() -> Self {
        let job = JobRecord {
            job_id: DEMO_JOB_REF.to_string(),
            title: "Senior Software Engineer".to_string(),
            company: "TechCorp".to_string(),
            location: "San Francisco, CA".to_string(),
            description: "We are looking for a Senior Software Engineer with experience in \
                Python, JavaScript, and cloud technologies."
                .to_string(),
            requirements: strings(&[
                "5+ years of experience in software development",
                "Experience with Python and JavaScript",
                "Knowledge of cloud platforms like AWS",
                "Experience with React and Node.js",
            ]),
            skills: strings(&["Python", "JavaScript", "React", "Node.js", "AWS", "Docker"]),
            industry: "Technology".to_string(),
            employment_type: "Full-time".to_string(),
            seniority_level: "Senior".to_string(),
        };

        let people = [
            DemoPerson {
                slug: "demo1",
                name: "Alice Johnson",
                title: "Senior Software Engineer",
                company: "Google",
                location: "San Francisco, CA",
                school: "Stanford University",
                degree: "MS Computer Science",
                work: "Python, JavaScript, AWS",
                skills: &["Python", "JavaScript", "React", "AWS", "Docker"],
                relevance: 0.95,
            },
            DemoPerson {
                slug: "demo2",
                name: "Bob Smith",
                title: "Lead Developer",
                company: "Microsoft",
                location: "Seattle, WA",
                school: "UC Berkeley",
                degree: "BS Computer Science",
                work: "C#, .NET, Azure",
                skills: &["C#", ".NET", "Azure", "JavaScript"],
                relevance: 0.85,
            },
            DemoPerson {
                slug: "demo3",
                name: "Carol Davis",
                title: "Full Stack Engineer",
                company: "Netflix",
                location: "Los Gatos, CA",
                school: "MIT",
                degree: "BS Computer Science",
                work: "React, Node.js, AWS",
                skills: &["React", "Node.js", "JavaScript", "AWS"],
                relevance: 0.8,
            },
            DemoPerson {
                slug: "demo4",
                name: "David Wilson",
                title: "Software Engineer",
                company: "StartupXYZ",
                location: "San Francisco, CA",
                school: "University of Washington",
                degree: "BS Computer Science",
                work: "Python, JavaScript",
                skills: &["Python", "JavaScript", "React"],
                relevance: 0.7,
            },
            DemoPerson {
                slug: "demo5",
                name: "Eva Brown",
                title: "Junior Developer",
                company: "TechCorp",
                location: "Oakland, CA",
                school: "San Francisco State University",
                degree: "BS Computer Science",
                work: "JavaScript, HTML, CSS",
                skills: &["JavaScript", "HTML", "CSS"],
                relevance: 0.6,
            },
        ];

        let mut catalog = Self::default();
        catalog.jobs.insert(DEMO_JOB_REF.to_string(), job);
        for person in &people {
            let (summary, record) = person.build();
            catalog.enriched.insert(summary.url.clone(), record);
            catalog.profiles.push(summary);
        }
        catalog
    }
}

struct DemoPerson {
    slug: &'static str,
    name: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    school: &'static str,
    degree: &'static str,
    work: &'static str,
    skills: &'static [&'static str],
    relevance: f64,
}

impl DemoPerson {
    fn build(&self) -> (ProfileSummary, CandidateRecord) {
        let url = format!("https://linkedin.com/in/{}", self.slug);
        let headline = format!("{} at {}", self.title, self.company);

        let summary = ProfileSummary {
            url: url.clone(),
            name: self.name.to_string(),
            headline: headline.clone(),
            location: self.location.to_string(),
            snippet: format!("{headline}. {}", self.work),
            relevance_score: self.relevance,
        };

        let record = CandidateRecord {
            name: self.name.to_string(),
            headline,
            location: self.location.to_string(),
            education: vec![EducationEntry {
                school: self.school.to_string(),
                degree: self.degree.to_string(),
                ..Default::default()
            }],
            experience: vec![ExperienceEntry {
                title: self.title.to_string(),
                company: self.company.to_string(),
                description: self.work.to_string(),
                ..Default::default()
            }],
            skills: strings(self.skills),
            profile_url: url,
            summary: String::new(),
        };

        (summary, record)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl JobFetcher for StaticCatalog {
    async fn fetch_job(&self, job_ref: &str) -> Result<JobRecord, CollaboratorError> {
        self.jobs
            .get(job_ref.trim())
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("job '{job_ref}'")))
    }
}

#[async_trait]
impl ProfileSearcher for StaticCatalog {
    /// Every profile, highest relevance first. Equal scores keep catalog order.
    async fn search_profiles(&self, _job: &JobRecord) -> Result<Vec<ProfileSummary>, CollaboratorError> {
        let mut hits = self.profiles.clone();
        hits.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        Ok(hits)
    }
}

#[async_trait]
impl ProfileEnricher for StaticCatalog {
    async fn enrich_profile(
        &self,
        summary: &ProfileSummary,
    ) -> Result<Option<CandidateRecord>, CollaboratorError> {
        Ok(self.enriched.get(&summary.url).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_demo_catalog_is_consistent() {
        let catalog = StaticCatalog::demo();
        let job = catalog.fetch_job(DEMO_JOB_REF).await.unwrap();
        assert_eq!(job.company, "TechCorp");

        let hits = catalog.search_profiles(&job).await.unwrap();
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[0].name, "Alice Johnson");

        for hit in &hits {
            let record = catalog.enrich_profile(hit).await.unwrap().unwrap();
            assert_eq!(record.profile_url, hit.url);
            assert!(record.current_company().is_some());
        }
    }

    #[tokio::test]
    async fn test_unknown_job_ref() {
        let err = StaticCatalog::demo().fetch_job("nope").await.unwrap_err();
        assert!(matches!(err, CollaboratorError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_ranks_by_relevance() {
        let catalog = StaticCatalog {
            profiles: vec![
                ProfileSummary { url: "a".into(), relevance_score: 0.2, ..Default::default() },
                ProfileSummary { url: "b".into(), relevance_score: 0.9, ..Default::default() },
                ProfileSummary { url: "c".into(), relevance_score: 0.2, ..Default::default() },
            ],
            ..Default::default()
        };
        let urls: Vec<String> = catalog
            .search_profiles(&JobRecord::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.url)
            .collect();
        assert_eq!(urls, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_from_path_with_partial_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"profiles": [{{"url": "https://linkedin.com/in/x", "name": "X"}}]}}"#
        )
        .unwrap();

        let catalog = StaticCatalog::from_path(file.path()).unwrap();
        assert!(catalog.jobs.is_empty());
        assert_eq!(catalog.profiles[0].name, "X");
        assert_eq!(catalog.enrich_profile(&catalog.profiles[0]).await.unwrap(), None);
    }

    #[test]
    fn test_from_path_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(StaticCatalog::from_path(file.path()).is_err());
    }
}
