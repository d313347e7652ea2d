//! Template library, bucket selection and placeholder filling for the local
//! outreach back-ends.

use std::collections::HashMap;

use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;
use crate::scoring::reference_sets::contains_any;

/// Markers in a headline or job title that select the senior bucket.
const SENIOR_MARKERS: &[&str] = &[
    "senior", "lead", "principal", "staff", "architect", "director", "manager", "head",
];

/// Markers in a headline or job title that select the junior bucket.
const JUNIOR_MARKERS: &[&str] = &["junior", "entry", "graduate", "intern", "associate", "trainee"];

const FALLBACK_SKILLS: &str = "relevant technical skills";
const MAX_HIGHLIGHT_SKILLS: usize = 3;

/// Coarse message bucket. Selection order is the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBucket {
    LocationMatch,
    CompanyMatch,
    Senior,
    Junior,
    MidLevel,
}

/// Picks the bucket: location match > company match > senior > junior > mid-level.
pub fn select_bucket(candidate: &CandidateRecord, job: &JobRecord) -> TemplateBucket {
    if is_city_match(&candidate.location, &job.location) {
        return TemplateBucket::LocationMatch;
    }

    if candidate.current_company().is_some() {
        return TemplateBucket::CompanyMatch;
    }

    let headline = candidate.headline.to_lowercase();
    let job_title = job.title.to_lowercase();

    if contains_any(&headline, SENIOR_MARKERS) || contains_any(&job_title, SENIOR_MARKERS) {
        return TemplateBucket::Senior;
    }

    if contains_any(&headline, JUNIOR_MARKERS) || contains_any(&job_title, JUNIOR_MARKERS) {
        return TemplateBucket::Junior;
    }

    TemplateBucket::MidLevel
}

/// Same city: the part before the first comma, case-insensitive.
fn is_city_match(candidate_location: &str, job_location: &str) -> bool {
    let city = |loc: &str| loc.split(',').next().unwrap_or_default().trim().to_lowercase();
    let candidate_city = city(candidate_location);
    !candidate_city.is_empty() && candidate_city == city(job_location)
}

// ────────────────────────────────────────────────────────────────────────────
// Template libraries
// ────────────────────────────────────────────────────────────────────────────

/// Plain templates. Placeholders: name, headline, candidate_location,
/// job_title, company, location, skills_highlight, recruiter_name.
pub fn basic_templates(bucket: TemplateBucket) -> &'static [&'static str] {
    match bucket {
        TemplateBucket::LocationMatch => &[
            "Hi {name},

I noticed you're based in {candidate_location} and thought you might be interested in a {job_title} position at {company} in {location}.

Your {headline} experience and skills in {skills_highlight} make you a strong candidate for this role. Would you be open to a brief conversation?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::CompanyMatch => &[
            "Hi {name},

I was impressed by your {headline} background. We have a {job_title} opening at {company} in {location} that could be a great next step.

Your experience with {skills_highlight} is exactly what we need. Would you be interested in learning more about this opportunity?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::Senior => &[
            "Hi {name},

I came across your impressive background as {headline} and thought you'd be perfect for a {job_title} role at {company} in {location}.

Your experience with {skills_highlight} is exactly what we're looking for. Would you be interested in discussing this opportunity?

Best regards,
{recruiter_name}",
            "Hi {name},

Your {headline} track record stood out to me. We're hiring a {job_title} at {company} in {location}, and I think your depth in {skills_highlight} would make a real difference.

Would you be open to a short call this week?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::Junior => &[
            "Hi {name},

I noticed your {headline} experience and thought you might be interested in a {job_title} position at {company} in {location}.

Your skills in {skills_highlight} align well with our needs. Would you be open to a conversation about this role?

Best regards,
{recruiter_name}",
            "Hi {name},

We have a {job_title} opening at {company} in {location} that could be a great next step in your career, and your {headline} background caught my eye.

Your work with {skills_highlight} shows real potential. Would you like to hear more?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::MidLevel => &[
            "Hi {name},

I noticed your {headline} experience and thought you might be interested in a {job_title} position at {company} in {location}.

Your background in {skills_highlight} aligns perfectly with what we're looking for. Would you be open to a brief conversation about this opportunity?

Best regards,
{recruiter_name}",
            "Hi {name},

I came across your profile and was impressed by your {headline} experience. We have a {job_title} opening at {company} in {location} that might be a great fit.

Your skills in {skills_highlight} are exactly what we're looking for. Would you be open to discussing this role?

Best regards,
{recruiter_name}",
        ],
    }
}

/// Richer templates. Adds the `current_company` placeholder.
pub fn enhanced_templates(bucket: TemplateBucket) -> &'static [&'static str] {
    match bucket {
        TemplateBucket::LocationMatch => &[
            "Hi {name},

I noticed you're based in {candidate_location} and thought you might be interested in a {job_title} position at {company} in {location}.

Your {headline} experience and skills in {skills_highlight} make you a great candidate for this role. Would you be open to discussing this opportunity?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::CompanyMatch => &[
            "Hi {name},

I was impressed by your {headline} experience at {current_company}. We have a {job_title} opening at {company} in {location} that could be a great next step.

Your expertise in {skills_highlight} is exactly what we need. Would you be interested in learning more about this opportunity?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::Senior => &[
            "Hi {name},

I was impressed by your {headline} experience and thought you'd be perfect for our {job_title} role at {company} in {location}.

Your expertise in {skills_highlight} aligns perfectly with what we're looking for. Given your background at {current_company}, I believe you'd bring valuable insights to our team.

Would you be interested in discussing this opportunity? I'd love to share more about the role and see if it's a good fit.

Best regards,
{recruiter_name}",
            "Hi {name},

I came across your profile and was struck by your {headline} experience. We're currently hiring for a {job_title} position at {company} in {location}, and your background seems like an excellent match.

Your skills in {skills_highlight} are exactly what we need, and your experience at {current_company} would be valuable to our team.

Would you be open to a brief conversation about this opportunity?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::Junior => &[
            "Hi {name},

I noticed your {headline} experience and thought you might be interested in a {job_title} position at {company} in {location}.

Your skills in {skills_highlight} show great potential. Would you be open to learning more about this opportunity?

Best regards,
{recruiter_name}",
            "Hi {name},

I came across your profile and was impressed by your {headline} background. We have a {job_title} opening at {company} in {location} that could be a great next step in your career.

Your experience with {skills_highlight} aligns well with what we're looking for. Would you be interested in discussing this role?

Best regards,
{recruiter_name}",
        ],
        TemplateBucket::MidLevel => &[
            "Hi {name},

I noticed your {headline} experience and thought you might be interested in a {job_title} position at {company} in {location}.

Your background in {skills_highlight} aligns well with our requirements. Would you be interested in learning more about this opportunity?

Best regards,
{recruiter_name}",
            "Hi {name},

I came across your profile and was impressed by your {headline} experience. We have a {job_title} opening at {company} in {location} that might be a great fit.

Your skills in {skills_highlight} are exactly what we're looking for. Would you be open to discussing this role?

Best regards,
{recruiter_name}",
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholder values
// ────────────────────────────────────────────────────────────────────────────

/// Placeholder values shared by both local back-ends, with their defaults.
pub fn base_placeholders(
    candidate: &CandidateRecord,
    job: &JobRecord,
    sender_name: &str,
) -> HashMap<&'static str, String> {
    HashMap::from([
        ("name", or_default(&candidate.name, "there")),
        ("headline", or_default(&candidate.headline, "professional experience")),
        ("candidate_location", or_default(&candidate.location, "your area")),
        ("job_title", or_default(&job.title, "this position")),
        ("company", or_default(&job.company, "our company")),
        ("location", or_default(&job.location, "our location")),
        ("skills_highlight", skills_highlight(candidate, job)),
        ("recruiter_name", or_default(sender_name, "Recruitment Team")),
    ])
}

/// Trimmed value, or `default` when blank.
pub fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Up to three title-cased skills the candidate shares with the job, else the
/// candidate's first three skills, else a generic phrase.
pub fn skills_highlight(candidate: &CandidateRecord, job: &JobRecord) -> String {
    let job_skills: Vec<String> = job.skills.iter().map(|s| s.trim().to_lowercase()).collect();

    let mut candidate_skills: Vec<String> = Vec::new();
    for skill in &candidate.skills {
        let skill = skill.trim().to_lowercase();
        if !skill.is_empty() && !candidate_skills.contains(&skill) {
            candidate_skills.push(skill);
        }
    }

    let matching: Vec<&String> = candidate_skills
        .iter()
        .filter(|s| job_skills.contains(s))
        .take(MAX_HIGHLIGHT_SKILLS)
        .collect();

    let chosen: Vec<&String> = if !matching.is_empty() {
        matching
    } else {
        candidate_skills.iter().take(MAX_HIGHLIGHT_SKILLS).collect()
    };

    if chosen.is_empty() {
        return FALLBACK_SKILLS.to_string();
    }

    chosen
        .iter()
        .map(|s| title_case(s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Uppercases the first letter of every alphabetic run: "node.js" → "Node.Js".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Single-pass `{key}` substitution. Unknown keys are left untouched, and
/// substituted values are never re-scanned.
pub fn fill_template(template: &str, values: &HashMap<&'static str, String>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapses runs of blank lines into one and trims the message.
pub fn clean_message(message: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in message.lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(if blank { "" } else { line.trim_end() });
        previous_blank = blank;
    }

    lines.join("\n").trim().to_string()
}
