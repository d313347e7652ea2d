//! Reference vocabularies consumed by the fit scorer, the JD parser and the
//! outreach templates.
//!
//! These are plain data injected at construction time, so a deployment (or a
//! test) can substitute its own lists without touching scoring code.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const ELITE_SCHOOLS: &[&str] = &[
    "mit", "stanford", "harvard", "caltech", "princeton", "yale", "columbia",
    "university of pennsylvania", "upenn", "university of chicago", "northwestern",
    "duke", "johns hopkins", "carnegie mellon", "cmu", "berkeley", "ucla",
    "university of michigan", "georgia tech", "gatech", "cornell", "brown",
    "dartmouth", "vanderbilt", "rice", "washington university", "washu",
    "university of southern california", "usc", "new york university", "nyu",
    "university of texas at austin", "ut austin", "university of illinois",
    "uiuc", "purdue", "university of wisconsin", "university of maryland",
    "university of virginia", "uva", "university of north carolina", "unc",
];

const INSTITUTION_KEYWORDS: &[&str] = &["university", "college", "institute"];
const DOCTORATE_MARKERS: &[&str] = &["phd", "ph.d", "doctorate"];
const MASTERS_MARKERS: &[&str] = &["master", "mba", "ms", "ma", "msc", "m.s."];

const TOP_COMPANIES: &[&str] = &[
    "google", "alphabet", "microsoft", "apple", "amazon", "meta", "facebook",
    "netflix", "tesla", "nvidia", "intel", "amd", "oracle", "salesforce",
    "adobe", "cisco", "ibm", "dell", "hp", "hewlett-packard", "vmware",
    "palantir", "airbnb", "uber", "lyft", "twitter", "linkedin", "dropbox",
    "slack", "zoom", "stripe", "square", "paypal", "shopify", "twilio",
    "databricks", "snowflake", "mongodb", "elastic", "atlassian", "jira",
    "confluence", "github", "gitlab", "docker", "kubernetes", "hashicorp",
];

const TECHNICAL_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "react", "angular", "vue",
    "node.js", "express", "django", "flask", "spring", "sql", "mysql",
    "postgresql", "mongodb", "redis", "aws", "azure", "gcp", "docker",
    "kubernetes", "git", "jenkins", "ci/cd", "agile", "scrum", "machine learning",
    "ai", "data science", "backend", "frontend", "full stack", "devops",
    "cloud", "api", "rest", "graphql", "microservices", "testing", "tdd",
    "bdd", "selenium", "junit", "pytest", "jest", "cypress", "terraform",
    "ansible", "chef", "puppet", "elasticsearch", "kafka", "rabbitmq",
    "nginx", "apache", "linux", "unix", "bash", "shell scripting",
];

const SENIORITY_MARKERS: &[&str] = &["senior", "lead", "principal", "staff"];
const MANAGEMENT_MARKERS: &[&str] = &["manager", "director", "head"];

const METRO_GROUPS: &[&[&str]] = &[
    &["san francisco", "san jose", "oakland"],
    &["new york", "brooklyn", "queens"],
];

const STATE_GROUPS: &[&[&str]] = &[&["california", "ca"]];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// All lookup tables used for heuristic matching. Entries are lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSets {
    pub elite_schools: Vec<String>,
    pub institution_keywords: Vec<String>,
    pub doctorate_markers: Vec<String>,
    pub masters_markers: Vec<String>,
    pub top_companies: Vec<String>,
    pub technical_skills: Vec<String>,
    /// Title markers for an individual-contributor promotion (trajectory +2).
    pub seniority_markers: Vec<String>,
    /// Title markers for a move into management (trajectory +3).
    pub management_markers: Vec<String>,
    /// Cities that count as the same commute area.
    pub metro_groups: Vec<Vec<String>>,
    /// Aliases of one state; short aliases only match whole tokens.
    pub state_groups: Vec<Vec<String>>,
}

impl Default for ReferenceSets {
    fn default() -> Self {
        Self {
            elite_schools: owned(ELITE_SCHOOLS),
            institution_keywords: owned(INSTITUTION_KEYWORDS),
            doctorate_markers: owned(DOCTORATE_MARKERS),
            masters_markers: owned(MASTERS_MARKERS),
            top_companies: owned(TOP_COMPANIES),
            technical_skills: owned(TECHNICAL_SKILLS),
            seniority_markers: owned(SENIORITY_MARKERS),
            management_markers: owned(MANAGEMENT_MARKERS),
            metro_groups: METRO_GROUPS.iter().map(|g| owned(g)).collect(),
            state_groups: STATE_GROUPS.iter().map(|g| owned(g)).collect(),
        }
    }
}

impl ReferenceSets {
    /// Loads custom vocabularies from a JSON file. Missing keys keep the stock lists.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference sets from {}", path.display()))?;
        let mut sets: ReferenceSets = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid reference sets JSON in {}", path.display()))?;
        sets.normalize();
        Ok(sets)
    }

    /// Lowercases every entry so matching can assume lowercase on both sides.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.elite_schools,
            &mut self.institution_keywords,
            &mut self.doctorate_markers,
            &mut self.masters_markers,
            &mut self.top_companies,
            &mut self.technical_skills,
            &mut self.seniority_markers,
            &mut self.management_markers,
        ] {
            lowercase_all(list);
        }
        for group in self.metro_groups.iter_mut().chain(self.state_groups.iter_mut()) {
            lowercase_all(group);
        }
    }

    /// Vocabulary terms that occur in `text` (which must already be lowercase).
    pub fn skills_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.technical_skills
            .iter()
            .map(String::as_str)
            .filter(move |skill| text.contains(skill))
    }
}

fn lowercase_all(list: &mut [String]) {
    for item in list.iter_mut() {
        *item = item.trim().to_lowercase();
    }
}

/// True if `text` contains any of `markers` as a plain substring.
pub fn contains_any<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    markers.iter().any(|m| text.contains(m.as_ref()))
}

/// Marker match that avoids abbreviation false positives: markers of three
/// characters or fewer ("ms", "ca") must equal a whole alphanumeric token,
/// longer markers match as substrings.
pub fn contains_marker(text: &str, marker: &str) -> bool {
    if marker.chars().count() <= 3 {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|token| token == marker)
    } else {
        text.contains(marker)
    }
}

pub fn contains_any_marker<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    markers.iter().any(|m| contains_marker(text, m.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets_are_lowercase() {
        let mut sets = ReferenceSets::default();
        let before = sets.clone();
        sets.normalize();
        assert_eq!(sets, before);
    }

    #[test]
    fn test_short_marker_matches_whole_token_only() {
        assert!(contains_marker("ms computer science", "ms"));
        assert!(contains_marker("san francisco, ca", "ca"));
        assert!(!contains_marker("chicago, il", "ca"));
        assert!(!contains_marker("bachelor of mathematics", "ma"));
    }

    #[test]
    fn test_long_marker_matches_substring() {
        assert!(contains_marker("masters in data science", "master"));
        assert!(contains_marker("los angeles, california", "california"));
    }

    #[test]
    fn test_skills_in_finds_vocabulary_terms() {
        let sets = ReferenceSets::default();
        let found: Vec<&str> = sets.skills_in("built kafka pipelines on aws").collect();
        assert!(found.contains(&"kafka"));
        assert!(found.contains(&"aws"));
    }

    #[test]
    fn test_partial_json_keeps_stock_lists() {
        let sets: ReferenceSets =
            serde_json::from_str(r#"{"top_companies": ["Acme"]}"#).unwrap();
        assert_eq!(sets.top_companies, vec!["Acme".to_string()]);
        assert_eq!(sets.elite_schools, ReferenceSets::default().elite_schools);
    }

    #[test]
    fn test_from_path_normalizes_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sets.json");
        std::fs::write(&path, r#"{"elite_schools": ["  ETH Zurich "]}"#).unwrap();
        let sets = ReferenceSets::from_path(&path).unwrap();
        assert_eq!(sets.elite_schools, vec!["eth zurich".to_string()]);
    }
}
