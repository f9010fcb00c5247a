//! JogjaHub Guide, the travel question-answering assistant.

mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::AssistantConfig;

pub use gemini::GeminiClient;

pub const UNAVAILABLE_MESSAGE: &str = "AI Assistant is unavailable without API Key.";
pub const FAILURE_MESSAGE: &str = "Terjadi kesalahan saat menghubungi JogjaHub Guide.";
pub const EMPTY_ANSWER_MESSAGE: &str = "Maaf, saya tidak dapat menjawab saat ini.";
pub const TEMPERATURE: f32 = 0.7;

const PERSONA: &str = "You are a helpful Yogyakarta travel assistant named 'JogjaHub Guide'. \
Answer the user's question about DIY (Daerah Istimewa Yogyakarta) using a friendly local tone. \
Mention that the app integrates MSMEs, tourism, transportation, and culture from various government departments (Dinas).";

/// Single text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn for_query(model: &str, query: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: persona_prompt(query),
            temperature: TEMPERATURE,
        }
    }
}

/// Embeds the raw user question under the fixed guide persona.
pub fn persona_prompt(query: &str) -> String {
    format!("{PERSONA}\n\nUser Question: {query}")
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generation backend unavailable: {0}")]
    Backend(String),
}

/// Text-generation backend behind the assistant.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text, which may be empty.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Wraps a generator with the fallback answers the portal shows.
///
/// Without a generator every question gets [`UNAVAILABLE_MESSAGE`] and no
/// request is made.
#[derive(Clone)]
pub struct TravelAssistant {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
}

impl TravelAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            model: model.into(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            model: crate::config::DEFAULT_ASSISTANT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        match &config.api_key {
            Some(key) => {
                let client = GeminiClient::new(&config.base_url, key);
                Self::new(Arc::new(client), config.model.clone())
            }
            None => Self {
                generator: None,
                model: config.model.clone(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn respond(&self, query: &str) -> String {
        let Some(generator) = &self.generator else {
            return UNAVAILABLE_MESSAGE.to_string();
        };

        let request = GenerationRequest::for_query(&self.model, query);
        debug!(model = %request.model, "asking travel assistant");

        match generator.generate(&request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_ANSWER_MESSAGE.to_string(),
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "travel assistant call failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl std::fmt::Debug for TravelAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelAssistant")
            .field("available", &self.is_available())
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
        reply: Option<String>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            self.requests
                .lock()
                .expect("request log poisoned")
                .push(request.clone());
            self.reply
                .clone()
                .ok_or_else(|| GenerationError::Backend("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn missing_credential_returns_unavailable_without_calling_out() {
        let assistant = TravelAssistant::from_config(&AssistantConfig {
            api_key: None,
            // Unroutable; any request would fail rather than return the fallback.
            base_url: "http://127.0.0.1:9".to_string(),
            ..AssistantConfig::default()
        });

        let answer = assistant.respond("apa saja wisata di jogja").await;
        assert_eq!(answer, UNAVAILABLE_MESSAGE);
        assert!(!assistant.is_available());
    }

    #[tokio::test]
    async fn forwards_persona_prompt_and_temperature() {
        let generator = Arc::new(RecordingGenerator {
            reply: Some("Coba gudeg di Wijilan!".to_string()),
            ..RecordingGenerator::default()
        });
        let assistant = TravelAssistant::new(generator.clone(), "test-model");

        let answer = assistant.respond("kuliner malam?").await;

        assert_eq!(answer, "Coba gudeg di Wijilan!");
        let requests = generator.requests.lock().expect("request log poisoned");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(requests[0].prompt.contains("JogjaHub Guide"));
        assert!(requests[0].prompt.ends_with("User Question: kuliner malam?"));
    }

    #[tokio::test]
    async fn errors_map_to_failure_message() {
        let generator = Arc::new(RecordingGenerator::default());
        let assistant = TravelAssistant::new(generator, "test-model");
        assert_eq!(assistant.respond("halo").await, FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn empty_answer_maps_to_apology() {
        let generator = Arc::new(RecordingGenerator {
            reply: Some("  ".to_string()),
            ..RecordingGenerator::default()
        });
        let assistant = TravelAssistant::new(generator, "test-model");
        assert_eq!(assistant.respond("halo").await, EMPTY_ANSWER_MESSAGE);
    }
}
