//! LLM-drafted outreach. Any fault (transport, API status, empty reply)
//! degrades that one candidate to the basic template.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::local::TemplateOutreach;
use super::prompts::build_outreach_prompt;
use super::templates::clean_message;
use super::{OutreachGenerator, OutreachMessage, Provenance};
use crate::llm_client::prompts::RECRUITER_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::candidate::CandidateRecord;
use crate::models::job::JobRecord;
use crate::models::outcome::Outcome;

pub struct AiOutreach {
    generator: Arc<dyn TextGenerator>,
    fallback: TemplateOutreach,
    pacing: Duration,
}

impl AiOutreach {
    pub fn new(generator: Arc<dyn TextGenerator>, fallback: TemplateOutreach, pacing: Duration) -> Self {
        Self {
            generator,
            fallback,
            pacing,
        }
    }

    fn degrade(
        &self,
        candidate: &CandidateRecord,
        job: &JobRecord,
        sender_name: &str,
        reason: String,
    ) -> Outcome<OutreachMessage> {
        Outcome::degraded(
            OutreachMessage {
                message: self.fallback.render(candidate, job, sender_name),
                provenance: Provenance::AiFallbackTemplate,
            },
            reason,
        )
    }
}

#[async_trait]
impl OutreachGenerator for AiOutreach {
    async fn generate(
        &self,
        candidate: &CandidateRecord,
        job: &JobRecord,
        sender_name: &str,
    ) -> Outcome<OutreachMessage> {
        let prompt = build_outreach_prompt(candidate, job, sender_name);

        match self.generator.generate_text(&prompt, RECRUITER_SYSTEM).await {
            Ok(text) => {
                let message = clean_message(&text);
                if message.is_empty() {
                    return self.degrade(candidate, job, sender_name, "empty LLM reply".to_string());
                }
                debug!("AI draft for {}: {} chars", candidate.name, message.len());
                Outcome::success(OutreachMessage {
                    message,
                    provenance: Provenance::AiPrimary,
                })
            }
            Err(e) => self.degrade(candidate, job, sender_name, e.to_string()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "ai"
    }

    fn pacing(&self) -> Duration {
        self.pacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::outreach::picker::FixedPicker;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_text(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "connection refused".to_string(),
            })
        }
    }

    struct CannedGenerator {
        reply: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
            assert_eq!(system, RECRUITER_SYSTEM);
            assert!(prompt.contains("CANDIDATE INFO"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn outreach(generator: Arc<dyn TextGenerator>) -> AiOutreach {
        AiOutreach::new(
            generator,
            TemplateOutreach::new(Arc::new(FixedPicker(0))),
            Duration::ZERO,
        )
    }

    fn candidates() -> Vec<CandidateRecord> {
        ["Alice", "Bob", "Carol"]
            .iter()
            .map(|name| CandidateRecord {
                name: name.to_string(),
                profile_url: format!("https://linkedin.com/in/{}", name.to_lowercase()),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failing_llm_falls_back_for_every_candidate_in_order() {
        let results = outreach(Arc::new(FailingGenerator))
            .generate_all(&candidates(), &JobRecord::default(), "Dana")
            .await;

        assert_eq!(results.len(), 3);
        let names: Vec<&str> = results.iter().map(|r| r.candidate_name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
        for result in &results {
            assert_eq!(result.provenance, Provenance::AiFallbackTemplate);
            assert!(!result.message.is_empty());
            assert!(result.message.starts_with(&format!("Hi {},", result.candidate_name)));
            assert!(result
                .fallback_reason
                .as_deref()
                .is_some_and(|r| r.contains("connection refused")));
        }
    }

    #[tokio::test]
    async fn test_successful_draft_is_primary() {
        let generator = Arc::new(CannedGenerator {
            reply: "  Hi Alice,\n\n\n\nGreat fit.\n\nBest regards, Dana  ".to_string(),
            calls: AtomicUsize::new(0),
        });
        let outcome = outreach(generator.clone())
            .generate(&candidates()[0], &JobRecord::default(), "Dana")
            .await;

        assert!(!outcome.is_degraded());
        let draft = outcome.into_value();
        assert_eq!(draft.provenance, Provenance::AiPrimary);
        assert_eq!(draft.message, "Hi Alice,\n\nGreat fit.\n\nBest regards, Dana");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_degrades() {
        let generator = Arc::new(CannedGenerator {
            reply: "\n \n".to_string(),
            calls: AtomicUsize::new(0),
        });
        let outcome = outreach(generator)
            .generate(&candidates()[1], &JobRecord::default(), "Dana")
            .await;

        assert!(outcome.is_degraded());
        assert_eq!(outcome.value().provenance, Provenance::AiFallbackTemplate);
        assert!(outcome.value().message.starts_with("Hi Bob,"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_between_calls() {
        let ai = AiOutreach::new(
            Arc::new(FailingGenerator),
            TemplateOutreach::new(Arc::new(FixedPicker(0))),
            Duration::from_millis(500),
        );
        let started = tokio::time::Instant::now();
        ai.generate_all(&candidates(), &JobRecord::default(), "Dana").await;
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
