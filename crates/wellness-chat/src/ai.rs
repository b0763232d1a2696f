//! AI query adapter.
//!
//! Wraps a single prompt/response exchange with the external AI text
//! service. All failure shapes (transport, timeout, blank output) collapse
//! into one fixed apology so the raw error never reaches the user.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Failure kinds reported by an AI text service implementation.
#[derive(Debug, thiserror::Error)]
pub enum AiServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("empty response")]
    EmptyResponse,
}

/// A delegated AI text completion service. Implementations are external.
#[async_trait]
pub trait AiTextService: Send + Sync {
    /// Complete a single prompt. Exactly one response per call.
    async fn complete(&self, prompt: &str) -> Result<String, AiServiceError>;
}

/// Fixed apology returned on any AI failure, directing the user to a phone
/// number instead of surfacing the raw error.
pub fn ai_apology(phone: &str) -> String {
    format!(
        "I'm having trouble connecting right now. Please try again or contact \
         our counseling services directly at {}.",
        phone
    )
}

/// System/persona prompt prepended to every question.
pub const PERSONA_PROMPT: &str = "\
You are a compassionate mental health and wellness assistant at a university \
wellness service.

Your role:
- Provide empathetic, supportive, and non-judgmental mental health guidance
- Help students with stress, anxiety, depression, and general wellness
- Offer practical coping strategies and self-care tips

Guidelines:
- Be warm, friendly, and understanding
- Keep responses concise (2-3 paragraphs maximum)
- Never diagnose conditions or prescribe medication
- If someone is in crisis, ALWAYS urge them to call 988 (Crisis Lifeline) or 911
- Encourage professional help when needed

Remember: You're a supportive companion, not a replacement for professional care.";

/// Single-operation adapter over an [`AiTextService`].
pub struct AiQueryAdapter {
    service: Arc<dyn AiTextService>,
    model: String,
    persona: String,
    timeout: Duration,
    fallback_phone: String,
}

impl AiQueryAdapter {
    pub fn new(
        service: Arc<dyn AiTextService>,
        model: impl Into<String>,
        timeout: Duration,
        fallback_phone: String,
    ) -> Self {
        Self {
            service,
            model: model.into(),
            persona: PERSONA_PROMPT.to_string(),
            timeout,
            fallback_phone,
        }
    }

    /// Replace the default persona prompt.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask a single question. Always returns displayable text: the model's
    /// answer, or the apology on timeout, transport failure, or blank output.
    pub async fn ask(&self, question: &str) -> String {
        let prompt = format!("{}\n\nStudent question: {}", self.persona, question);
        tracing::debug!(model = %self.model, "Dispatching AI question");

        let outcome = tokio::time::timeout(self.timeout, self.service.complete(&prompt)).await;
        match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!(model = %self.model, "AI service returned an empty response");
                ai_apology(&self.fallback_phone)
            }
            Ok(Err(e)) => {
                tracing::warn!(model = %self.model, error = %e, "AI completion failed");
                ai_apology(&self.fallback_phone)
            }
            Err(_) => {
                tracing::warn!(
                    model = %self.model,
                    timeout_secs = self.timeout.as_secs(),
                    "AI completion timed out"
                );
                ai_apology(&self.fallback_phone)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "660.562.1348";

    struct EchoService;

    #[async_trait]
    impl AiTextService for EchoService {
        async fn complete(&self, prompt: &str) -> Result<String, AiServiceError> {
            Ok(format!("echo: {}", prompt))
        }
    }

    struct FailingService;

    #[async_trait]
    impl AiTextService for FailingService {
        async fn complete(&self, _prompt: &str) -> Result<String, AiServiceError> {
            Err(AiServiceError::Transport("502 bad gateway".to_string()))
        }
    }

    struct BlankService;

    #[async_trait]
    impl AiTextService for BlankService {
        async fn complete(&self, _prompt: &str) -> Result<String, AiServiceError> {
            Ok("   ".to_string())
        }
    }

    struct HangingService;

    #[async_trait]
    impl AiTextService for HangingService {
        async fn complete(&self, _prompt: &str) -> Result<String, AiServiceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    const MODEL: &str = "gemini-2.5-pro";

    fn adapter(service: Arc<dyn AiTextService>) -> AiQueryAdapter {
        AiQueryAdapter::new(service, MODEL, Duration::from_secs(30), PHONE.to_string())
    }

    #[test]
    fn test_adapter_carries_configured_model() {
        let adapter = adapter(Arc::new(EchoService));
        assert_eq!(adapter.model(), MODEL);
    }

    #[tokio::test]
    async fn test_ask_prefixes_persona_prompt() {
        let adapter = adapter(Arc::new(EchoService));
        let answer = adapter.ask("how do I manage stress?").await;
        assert!(answer.contains("wellness assistant"));
        assert!(answer.contains("Student question: how do I manage stress?"));
    }

    #[tokio::test]
    async fn test_ask_custom_persona() {
        let adapter = adapter(Arc::new(EchoService)).with_persona("You are terse.");
        let answer = adapter.ask("hello").await;
        assert!(answer.starts_with("echo: You are terse.\n\nStudent question: hello"));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_apology() {
        let adapter = adapter(Arc::new(FailingService));
        let answer = adapter.ask("anything").await;
        assert_eq!(answer, ai_apology(PHONE));
        assert!(answer.contains(PHONE));
        assert!(!answer.contains("502"));
    }

    #[tokio::test]
    async fn test_blank_response_maps_to_apology() {
        let adapter = adapter(Arc::new(BlankService));
        let answer = adapter.ask("anything").await;
        assert_eq!(answer, ai_apology(PHONE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_apology() {
        let adapter = AiQueryAdapter::new(
            Arc::new(HangingService),
            MODEL,
            Duration::from_millis(100),
            PHONE.to_string(),
        );
        let answer = adapter.ask("anything").await;
        assert_eq!(answer, ai_apology(PHONE));
    }

    #[test]
    fn test_ai_service_error_display() {
        assert_eq!(
            AiServiceError::Transport("refused".to_string()).to_string(),
            "transport error: refused"
        );
        assert_eq!(AiServiceError::Timeout.to_string(), "request timed out");
        assert_eq!(AiServiceError::EmptyResponse.to_string(), "empty response");
    }
}
