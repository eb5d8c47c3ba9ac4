//! Recommender-specific data types

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use shared::{
    ProviderId, RecommendationRecord, RecommendationSource, SessionKey, WeatherSnapshot,
};

/// One recommendation cycle's input
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub session: SessionKey,
    pub cafeteria_menu: String,
    pub weather: WeatherSnapshot,
    /// Cafeteria-avoidance ("CAM") mode: favour outside restaurants
    pub prefer_external: bool,
}

impl RecommendationRequest {
    pub fn new(cafeteria_menu: impl Into<String>, weather: WeatherSnapshot) -> Self {
        Self {
            session: SessionKey::global(),
            cafeteria_menu: cafeteria_menu.into(),
            weather,
            prefer_external: true,
        }
    }

    pub fn with_session(mut self, session: SessionKey) -> Self {
        self.session = session;
        self
    }
}

/// Mode the model reports it ran in
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeInfo {
    pub name: String,
    pub reason: String,
}

/// Parsed model output before the consistency layer runs
#[derive(Debug, Clone, Deserialize)]
pub struct AiPayload {
    pub recommendations: Vec<RecommendationRecord>,
    #[serde(default, deserialize_with = "lenient_mode")]
    pub mode: Option<ModeInfo>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weather_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brief_rationale: Option<String>,
}

/// Final answer handed to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub cafeteria_menu: String,
    pub recommendations: Vec<RecommendationRecord>,
    pub weather_summary: String,
    pub weather_info: WeatherSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_rationale: Option<String>,
    pub source: RecommendationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,
    pub generated_at: DateTime<Utc>,
}

/// Synthetic nearby restaurant offered to the model as a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearbyOption {
    pub name: String,
    pub category: String,
    pub walking_min: u32,
    #[serde(rename = "priceLevel")]
    pub price_level: String,
    #[serde(rename = "openNow")]
    pub open_now: bool,
    pub details: String,
}

/// Provider response data
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub model_used: String,
    pub response_time: Duration,
}

impl ProviderResponse {
    pub fn tokens_used(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// `{"name", "reason"}` object or a bare mode name; anything else is dropped
fn lenient_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ModeInfo>, D::Error> {
    let text = |value: &Value, key: &str| {
        value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
    };

    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) if !name.trim().is_empty() => Some(ModeInfo { name, reason: String::new() }),
        object @ Value::Object(_) => Some(ModeInfo {
            name: text(&object, "name"),
            reason: text(&object, "reason"),
        }),
        _ => None,
    })
}

/// Optional free text; non-string values are dropped
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}
