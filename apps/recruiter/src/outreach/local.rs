//! Template-only outreach back-ends. No network, always succeed.

use std::sync::Arc;

use async_trait::async_trait;

use super::picker::VariantPicker;
use super::templates::{
    base_placeholders, basic_templates, clean_message, enhanced_templates, fill_template,
    select_bucket,
};
use super::{OutreachGenerator, OutreachMessage, Provenance};
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;
use crate::models::outcome::Outcome;

/// Schools that earn the "Your background from ..." opener.
const PRESTIGE_SCHOOLS: &[&str] = &["stanford", "mit", "harvard", "berkeley", "caltech"];
const EXTENSIVE_EXPERIENCE_ROLES: usize = 5;
const EXPERTISE_PHRASE: &str = "Your expertise in";

/// Basic templates, one random variant per bucket.
#[derive(Clone)]
pub struct TemplateOutreach {
    picker: Arc<dyn VariantPicker>,
}

impl TemplateOutreach {
    pub fn new(picker: Arc<dyn VariantPicker>) -> Self {
        Self { picker }
    }

    /// Renders synchronously. Shared with the AI back-end's fallback path.
    pub fn render(&self, candidate: &CandidateRecord, job: &JobRecord, sender_name: &str) -> String {
        let variants = basic_templates(select_bucket(candidate, job));
        let template = variants[self.picker.pick(variants.len())];
        let values = base_placeholders(candidate, job, sender_name);
        clean_message(&fill_template(template, &values))
    }
}

#[async_trait]
impl OutreachGenerator for TemplateOutreach {
    async fn generate(
        &self,
        candidate: &CandidateRecord,
        job: &JobRecord,
        sender_name: &str,
    ) -> Outcome<OutreachMessage> {
        Outcome::success(OutreachMessage {
            message: self.render(candidate, job, sender_name),
            provenance: Provenance::Template,
        })
    }

    fn backend_name(&self) -> &'static str {
        "template"
    }
}

/// Richer templates with a current-company slot and a personalization pass.
#[derive(Clone)]
pub struct EnhancedOutreach {
    picker: Arc<dyn VariantPicker>,
}

impl EnhancedOutreach {
    pub fn new(picker: Arc<dyn VariantPicker>) -> Self {
        Self { picker }
    }

    pub fn render(&self, candidate: &CandidateRecord, job: &JobRecord, sender_name: &str) -> String {
        let variants = enhanced_templates(select_bucket(candidate, job));
        let template = variants[self.picker.pick(variants.len())];

        let mut values = base_placeholders(candidate, job, sender_name);
        values.insert(
            "current_company",
            candidate
                .current_company()
                .unwrap_or("your current company")
                .to_string(),
        );

        personalize(&clean_message(&fill_template(template, &values)), candidate)
    }
}

/// Rewrites the "Your expertise in" opener for prestige schools or long careers.
fn personalize(message: &str, candidate: &CandidateRecord) -> String {
    if !message.contains(EXPERTISE_PHRASE) {
        return message.to_string();
    }

    if let Some(school) = candidate.education.first().map(|e| e.school.trim()) {
        let lowered = school.to_lowercase();
        if !school.is_empty() && PRESTIGE_SCHOOLS.iter().any(|p| lowered.contains(p)) {
            return message.replacen(
                EXPERTISE_PHRASE,
                &format!("Your background from {school} and expertise in"),
                1,
            );
        }
    }

    if candidate.experience.len() >= EXTENSIVE_EXPERIENCE_ROLES {
        return message.replacen(EXPERTISE_PHRASE, "Your extensive experience and expertise in", 1);
    }

    message.to_string()
}

#[async_trait]
impl OutreachGenerator for EnhancedOutreach {
    async fn generate(
        &self,
        candidate: &CandidateRecord,
        job: &JobRecord,
        sender_name: &str,
    ) -> Outcome<OutreachMessage> {
        Outcome::success(OutreachMessage {
            message: self.render(candidate, job, sender_name),
            provenance: Provenance::EnhancedLocal,
        })
    }

    fn backend_name(&self) -> &'static str {
        "enhanced"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{EducationEntry, ExperienceEntry};
    use crate::outreach::picker::FixedPicker;

    fn job() -> JobRecord {
        JobRecord {
            title: "Senior Software Engineer".to_string(),
            company: "TechCorp".to_string(),
            location: "San Francisco, CA".to_string(),
            skills: vec!["Python".into(), "React".into()],
            ..Default::default()
        }
    }

    fn candidate() -> CandidateRecord {
        CandidateRecord {
            name: "Alice Johnson".to_string(),
            headline: "Senior Software Engineer at Google".to_string(),
            location: "Austin, TX".to_string(),
            skills: vec!["python".into(), "react".into(), "go".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_template_message_shape() {
        let outreach = TemplateOutreach::new(Arc::new(FixedPicker(0)));
        let outcome = outreach.generate(&candidate(), &job(), "Dana").await;

        assert!(!outcome.is_degraded());
        let draft = outcome.into_value();
        assert_eq!(draft.provenance, Provenance::Template);
        assert!(draft.message.starts_with("Hi Alice Johnson,"));
        assert!(draft.message.ends_with("Best regards,\nDana"));
        assert!(draft.message.contains("Python, React"));
        assert!(!draft.message.contains('{'));
    }

    #[tokio::test]
    async fn test_template_defaults_for_empty_candidate() {
        let outreach = TemplateOutreach::new(Arc::new(FixedPicker(1)));
        let draft = outreach
            .generate(&CandidateRecord::default(), &JobRecord::default(), "")
            .await
            .into_value();
        assert!(draft.message.starts_with("Hi there,"));
        assert!(draft.message.contains("relevant technical skills"));
        assert!(draft.message.ends_with("Recruitment Team"));
    }

    #[test]
    fn test_enhanced_fills_current_company() {
        let outreach = EnhancedOutreach::new(Arc::new(FixedPicker(0)));
        let message = outreach.render(&candidate(), &job(), "Dana");
        assert!(message.contains("at Google"));
        assert!(!message.contains("{current_company}"));
    }

    #[test]
    fn test_enhanced_prestige_school_rewrite() {
        let mut c = candidate();
        c.education.push(EducationEntry {
            school: "Stanford University".to_string(),
            ..Default::default()
        });
        let message = EnhancedOutreach::new(Arc::new(FixedPicker(0))).render(&c, &job(), "Dana");
        assert!(message.contains("Your background from Stanford University and expertise in"));
    }

    #[test]
    fn test_enhanced_extensive_experience_rewrite() {
        let mut c = candidate();
        c.experience = (0..5)
            .map(|i| ExperienceEntry {
                company: format!("Co{i}"),
                ..Default::default()
            })
            .collect();
        let message = EnhancedOutreach::new(Arc::new(FixedPicker(0))).render(&c, &job(), "Dana");
        assert!(message.contains("Your extensive experience and expertise in"));
    }

    #[test]
    fn test_personalize_leaves_other_variants_alone() {
        let message = "Hi Ann,\n\nYour skills in Rust are great.";
        let mut c = candidate();
        c.experience = vec![ExperienceEntry::default(); 6];
        assert_eq!(personalize(message, &c), message);
    }

    #[tokio::test]
    async fn test_enhanced_provenance() {
        let outcome = EnhancedOutreach::new(Arc::new(FixedPicker(0)))
            .generate(&candidate(), &job(), "Dana")
            .await;
        assert_eq!(outcome.value().provenance, Provenance::EnhancedLocal);
    }
}
