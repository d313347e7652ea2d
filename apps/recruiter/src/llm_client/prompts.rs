// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt for every recruiter-voice generation.
pub const RECRUITER_SYSTEM: &str = "You are a professional recruiter. \
    Write personalized, friendly outreach messages. \
    Respond with the message text only: no subject line, no commentary, no markdown.";

/// Appended to generation prompts so drafts stay factual.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only mention background details that appear in the candidate info above. \
    Do NOT invent employers, schools, titles, or years of experience.";
