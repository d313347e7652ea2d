//! JD Parser: turns a raw posting into a `JobRecord` with keyword heuristics.
//! No LLM involved: requirements are description lines, skills come from the
//! shared technical vocabulary.

use crate::models::job::{JobRecord, RawPosting};
use crate::scoring::reference_sets::{contains_any, ReferenceSets};

/// A description line mentioning any of these is kept as a requirement.
const REQUIREMENT_KEYWORDS: &[&str] = &[
    "experience", "years", "degree", "bachelor", "master", "phd", "required", "must have",
];
const MAX_REQUIREMENTS: usize = 10;

const INDUSTRIES: &[&str] = &[
    "technology",
    "healthcare",
    "finance",
    "education",
    "retail",
    "manufacturing",
    "consulting",
    "media",
    "entertainment",
    "real estate",
    "transportation",
    "energy",
];

const SENIOR_WORDS: &[&str] = &["senior", "lead", "principal", "staff", "architect"];
const ENTRY_WORDS: &[&str] = &["junior", "entry", "graduate", "intern"];
const MANAGEMENT_WORDS: &[&str] = &["director", "manager", "head", "vp", "cto", "ceo"];

/// Builds a `JobRecord` from a raw posting. Never fails; unknown fields stay empty.
pub fn parse_posting(posting: RawPosting, sets: &ReferenceSets) -> JobRecord {
    let description_lower = posting.description.to_lowercase();

    JobRecord {
        requirements: extract_requirements(&posting.description),
        skills: extract_skills(&posting.skills, &description_lower, sets),
        industry: detect_industry(&description_lower),
        employment_type: detect_employment_type(&description_lower).to_string(),
        seniority_level: detect_seniority(&posting.title, &description_lower).to_string(),
        job_id: posting.job_id,
        title: posting.title.trim().to_string(),
        company: posting.company.trim().to_string(),
        location: posting.location.trim().to_string(),
        description: posting.description,
    }
}

fn extract_requirements(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| contains_any(&line.to_lowercase(), REQUIREMENT_KEYWORDS))
        .take(MAX_REQUIREMENTS)
        .map(str::to_string)
        .collect()
}

/// Declared tags first, then vocabulary hits from the description, without duplicates.
fn extract_skills(declared: &[String], description_lower: &str, sets: &ReferenceSets) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    let declared = declared.iter().map(|s| s.trim()).filter(|s| !s.is_empty());
    let detected = sets.skills_in(description_lower);

    for skill in declared.chain(detected) {
        let key = skill.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            skills.push(skill.to_string());
        }
    }
    skills
}

fn detect_industry(description_lower: &str) -> String {
    INDUSTRIES
        .iter()
        .find(|industry| description_lower.contains(*industry))
        .map(|industry| industry.to_string())
        .unwrap_or_default()
}

fn detect_employment_type(description_lower: &str) -> &'static str {
    if contains_any(description_lower, &["full-time", "full time"]) {
        "Full-time"
    } else if contains_any(description_lower, &["part-time", "part time"]) {
        "Part-time"
    } else if description_lower.contains("contract") {
        "Contract"
    } else if description_lower.contains("intern") {
        "Internship"
    } else {
        "Full-time"
    }
}

fn detect_seniority(title: &str, description_lower: &str) -> &'static str {
    let text = format!("{} {}", title.to_lowercase(), description_lower);

    if contains_any(&text, SENIOR_WORDS) {
        "Senior"
    } else if contains_any(&text, ENTRY_WORDS) {
        "Entry-level"
    } else if contains_any(&text, MANAGEMENT_WORDS) {
        "Management"
    } else {
        "Mid-level"
    }
}
