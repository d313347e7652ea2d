use serde::{Deserialize, Serialize};

/// A parsed job posting. Built once per pipeline run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    /// Reference of the posting at its source (e.g. a job board id). Not the report id.
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub industry: String,
    pub employment_type: String,
    pub seniority_level: String,
}

/// An unparsed posting as a fetcher or an API caller hands it over.
/// `jd_parser::parse_posting` turns it into a `JobRecord`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPosting {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// Explicit skill tags; merged with the ones detected in the description.
    pub skills: Vec<String>,
}
