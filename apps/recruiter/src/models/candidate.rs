use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
}

/// A candidate profile after enrichment. Any field may be empty when the
/// enrichment source had nothing for it; scorers treat empty as "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateRecord {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub profile_url: String,
    pub summary: String,
}

/// Lightweight search hit, before enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummary {
    pub url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub snippet: String,
    pub relevance_score: f64,
}

impl CandidateRecord {
    /// Basic record used when enrichment yields nothing for a search hit.
    pub fn from_summary(summary: &ProfileSummary) -> Self {
        Self {
            name: summary.name.clone(),
            headline: summary.headline.clone(),
            location: summary.location.clone(),
            profile_url: summary.url.clone(),
            summary: summary.snippet.clone(),
            ..Self::default()
        }
    }

    /// Company the candidate currently works at: the part of the headline after
    /// the last " at ", else the first experience entry's company.
    pub fn current_company(&self) -> Option<&str> {
        if let Some((_, company)) = self.headline.rsplit_once(" at ") {
            let company = company.trim();
            if !company.is_empty() {
                return Some(company);
            }
        }
        self.experience
            .first()
            .map(|e| e.company.trim())
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_summary_keeps_basic_fields() {
        let summary = ProfileSummary {
            url: "https://linkedin.com/in/jane".to_string(),
            name: "Jane Doe".to_string(),
            headline: "Backend Engineer".to_string(),
            location: "Austin, TX".to_string(),
            snippet: "Builds APIs".to_string(),
            relevance_score: 8.0,
        };
        let record = CandidateRecord::from_summary(&summary);
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.profile_url, "https://linkedin.com/in/jane");
        assert_eq!(record.summary, "Builds APIs");
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_current_company_from_headline_suffix() {
        let record = CandidateRecord {
            headline: "Senior Engineer at Data at Scale Inc".to_string(),
            ..Default::default()
        };
        assert_eq!(record.current_company(), Some("Scale Inc"));
    }

    #[test]
    fn test_current_company_falls_back_to_first_experience() {
        let record = CandidateRecord {
            headline: "Software Engineer".to_string(),
            experience: vec![ExperienceEntry {
                company: "Netflix".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(record.current_company(), Some("Netflix"));
    }

    #[test]
    fn test_current_company_none_when_unknown() {
        assert_eq!(CandidateRecord::default().current_company(), None);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let record: CandidateRecord = serde_json::from_str(r#"{"name": "Ann"}"#).unwrap();
        assert_eq!(record.name, "Ann");
        assert!(record.headline.is_empty());
        assert!(record.education.is_empty());
    }
}
