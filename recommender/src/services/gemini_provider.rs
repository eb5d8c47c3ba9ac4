//! Gemini `generateContent` client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use shared::{ApiFailure, GenerationSettings, ProcessId, ProviderId, process_debug, process_warn};

use crate::error::{RecommenderError, RecommenderResult};
use crate::traits::RecommendationProvider;
use crate::types::ProviderResponse;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini provider configured with one API key and fixed generation settings
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    settings: GenerationSettings,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider; settings are validated up front
    pub fn new(api_key: impl Into<String>, settings: GenerationSettings) -> RecommenderResult<Self> {
        settings.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| RecommenderError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            settings,
            base_url: GEMINI_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different host (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// First non-empty key among the provider's environment variables
    pub fn api_key_from_env() -> Option<String> {
        ProviderId::Gemini
            .api_key_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Build from the environment; `Ok(None)` when no key is configured
    pub fn from_env(settings: GenerationSettings) -> RecommenderResult<Option<Self>> {
        match Self::api_key_from_env() {
            Some(key) => Self::new(key, settings).map(Some),
            None => Ok(None),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.settings.model, self.api_key
        )
    }

    fn request_body(&self, system_instruction: &str, user_message: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user_message }]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": self.settings.temperature
            }
        })
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response_json: &Value) -> Option<String> {
    let parts = response_json
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!text.trim().is_empty()).then_some(text)
}

fn token_count(response_json: &Value, field: &str) -> u32 {
    response_json
        .get("usageMetadata")
        .and_then(|u| u.get(field))
        .and_then(Value::as_u64)
        .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, system_instruction: &str, user_message: &str) -> Result<ProviderResponse, ApiFailure> {
        if self.api_key.is_empty() {
            return Err(ApiFailure::MissingApiKey);
        }

        let request_start = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&self.request_body(system_instruction, user_message))
            .send()
            .await
            .map_err(|e| ApiFailure::NetworkError(e.to_string()))?;

        let response_time = request_start.elapsed();
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            process_warn!(
                ProcessId::current(),
                status = status.as_u16(),
                "Gemini request rejected"
            );
            return Err(ApiFailure::from_status(status.as_u16(), &body));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::MalformedResponse(format!("Failed to parse response: {e}")))?;

        let content = extract_text(&response_json).ok_or(ApiFailure::EmptyContent)?;

        let prompt_tokens = token_count(&response_json, "promptTokenCount");
        let completion_tokens = token_count(&response_json, "candidatesTokenCount");

        process_debug!(
            ProcessId::current(),
            model = %self.settings.model,
            elapsed_ms = response_time.as_millis() as u64,
            tokens = prompt_tokens.saturating_add(completion_tokens),
            "Gemini response received"
        );

        Ok(ProviderResponse {
            content,
            prompt_tokens,
            completion_tokens,
            model_used: self.settings.model.clone(),
            response_time,
        })
    }
}
