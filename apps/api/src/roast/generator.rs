//! Roast Generator — turns extracted profile text into a short French roast.
//!
//! Total by construction: every failure path resolves to a fixed string, so the
//! HTTP layer never sees an upstream model error.

use std::sync::Arc;

use tracing::error;

use crate::llm_client::TextModel;
use crate::roast::prompts::{FALLBACK_ROAST, MISSING_API_KEY_ROAST, ROAST_PROMPT_TEMPLATE};

/// Holds the model handle decided at startup. `None` means no credential was configured.
#[derive(Clone)]
pub struct RoastGenerator {
    model: Option<Arc<dyn TextModel>>,
}

impl RoastGenerator {
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn generate(&self, profile_text: &str) -> String {
        let Some(model) = &self.model else {
            return MISSING_API_KEY_ROAST.to_string();
        };

        match model.generate_content(&build_prompt(profile_text)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                error!("Gemini error: {e}");
                FALLBACK_ROAST.to_string()
            }
        }
    }
}

pub fn build_prompt(profile_text: &str) -> String {
    ROAST_PROMPT_TEMPLATE.replace("{profile_text}", profile_text)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Replies with a fixed text and records every prompt it receives.
    pub struct StubModel {
        pub reply: String,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        pub fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextModel for StubModel {
        async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    pub struct FailingModel;

    #[async_trait]
    impl TextModel for FailingModel {
        async fn generate_content(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_unconfigured_returns_missing_key_string() {
        let generator = RoastGenerator::new(None);
        assert!(!generator.is_configured());
        assert_eq!(
            generator.generate("Jean Dupont").await,
            "⚠️ Clé API Google manquante. Configure GOOGLE_API_KEY."
        );
    }

    #[tokio::test]
    async fn test_model_output_is_trimmed() {
        let model = Arc::new(StubModel::new("\n  Ton CV ressemble à un ticket de caisse.  \n"));
        let handle: Arc<dyn TextModel> = model.clone();
        let generator = RoastGenerator::new(Some(handle));
        assert!(generator.is_configured());

        let roast = generator.generate("Jean Dupont, consultant").await;
        assert_eq!(roast, "Ton CV ressemble à un ticket de caisse.");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Jean Dupont, consultant"));
    }

    #[tokio::test]
    async fn test_model_failure_returns_fallback() {
        let handle: Arc<dyn TextModel> = Arc::new(FailingModel);
        let generator = RoastGenerator::new(Some(handle));
        assert_eq!(
            generator.generate("Jean Dupont").await,
            "Même l'IA a levé les yeux au ciel en lisant ce profil."
        );
    }

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "Expert en synergie {agile}\n10 ans d'expérience";
        let prompt = build_prompt(text);
        assert!(prompt.contains(text));
        assert!(!prompt.contains("{profile_text}"));
        assert!(prompt.contains("3 à 5 phrases maximum."));
        assert!(prompt.contains("Aucun préambule. Génère uniquement le roast."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("abc"), build_prompt("abc"));
    }
}
