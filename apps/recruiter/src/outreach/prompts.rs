// Prompt template for the AI outreach back-end.
// The system prompt and grounding fragment live in llm_client::prompts.

use std::collections::HashMap;

use super::templates::{fill_template, or_default};
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;

/// Outreach prompt template.
/// Replace: {name}, {headline}, {candidate_location}, {candidate_skills},
///          {role_count}, {job_title}, {company}, {job_location}, {job_skills},
///          {requirements}, {sender_name}, {grounding_instruction}
pub const OUTREACH_PROMPT_TEMPLATE: &str = r#"Write a personalized recruitment message for this candidate:

CANDIDATE INFO:
- Name: {name}
- Current Role: {headline}
- Location: {candidate_location}
- Skills: {candidate_skills}
- Experience: {role_count} positions

JOB DETAILS:
- Position: {job_title}
- Company: {company}
- Location: {job_location}
- Key Skills: {job_skills}
- Requirements: {requirements}

Write a brief, professional message (under 150 words) that:
1. Mentions specific aspects of their background
2. Explains why they'd be a good fit
3. Includes a clear call to action
4. Sounds natural and friendly

{grounding_instruction}

Start with "Hi {name}," and end with "Best regards, {sender_name}"."#;

const TOP_SKILLS: usize = 3;
const TOP_REQUIREMENTS: usize = 2;

/// Fills the outreach template from a candidate and job in one pass, so field
/// text is never scanned for further placeholders. Blank fields get neutral
/// wording instead of empty lines.
pub fn build_outreach_prompt(candidate: &CandidateRecord, job: &JobRecord, sender_name: &str) -> String {
    let values = HashMap::from([
        ("name", or_default(&candidate.name, "there")),
        ("headline", or_default(&candidate.headline, "professional experience")),
        ("candidate_location", or_default(&candidate.location, "your area")),
        (
            "candidate_skills",
            join_first(&candidate.skills, TOP_SKILLS, "your technical background"),
        ),
        ("role_count", candidate.experience.len().to_string()),
        ("job_title", or_default(&job.title, "this position")),
        ("company", or_default(&job.company, "our company")),
        ("job_location", or_default(&job.location, "our location")),
        ("job_skills", join_first(&job.skills, TOP_SKILLS, "various technologies")),
        (
            "requirements",
            join_first(&job.requirements, TOP_REQUIREMENTS, "Relevant experience"),
        ),
        ("sender_name", or_default(sender_name, "Recruitment Team")),
        ("grounding_instruction", GROUNDING_INSTRUCTION.to_string()),
    ]);

    fill_template(OUTREACH_PROMPT_TEMPLATE, &values)
}

fn join_first(items: &[String], n: usize, default: &str) -> String {
    let picked: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(n)
        .collect();
    if picked.is_empty() {
        default.to_string()
    } else {
        picked.join(", ")
    }
}
