//! Core types used throughout the lunch recommendation system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub mod recommendation;
pub mod weather;

pub use recommendation::{RecommendationRecord, RecommendationTier, RecordKey};
pub use weather::WeatherSnapshot;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Used when a binary never called `init_*` (unit tests, library embedding)
static DEFAULT_PROCESS_ID: ProcessId = ProcessId::Recommender;

/// Process identifier for any binary in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// One-shot command line recommender
    Recommender,
    /// HTTP front end
    WebServer,
}

impl ProcessId {
    /// Initialize the global process ID for the CLI recommender
    pub fn init_recommender() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Recommender)
    }

    /// Initialize the global process ID for webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&DEFAULT_PROCESS_ID)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Recommender => write!(f, "recommender"),
            ProcessId::WebServer => write!(f, "webserver"),
        }
    }
}

/// Generative-AI providers available in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
}

impl ProviderId {
    /// Environment variables consulted for this provider's key, in priority order
    pub fn api_key_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderId::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderId::Gemini),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

/// Where a returned batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Generated by a provider and passed through the consistency layer
    Ai,
    /// Static rule-based batch
    Fallback,
}

/// Scope of a recommendation history slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    pub const GLOBAL: &'static str = "global";

    /// Blank or missing identifiers collapse onto the process-wide slot
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::global()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_else(Self::global)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generation parameters sent with every provider request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ProviderId::Gemini.default_model().to_string(),
            temperature: 0.8,
            timeout_ms: 30_000,
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> crate::SharedResult<()> {
        if self.model.trim().is_empty() {
            return Err(crate::SharedError::InvalidConfig {
                field: "model".to_string(),
                value: self.model.clone(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(crate::SharedError::InvalidConfig {
                field: "temperature".to_string(),
                value: self.temperature.to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(crate::SharedError::InvalidConfig {
                field: "timeout_ms".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// API failure types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    MissingApiKey,
    InvalidApiKey,
    RateLimitExceeded,
    ModelUnavailable,
    NetworkError(String),
    ServerError(String),
    MalformedResponse(String),
    EmptyContent,
}

impl ApiFailure {
    /// Map a non-success HTTP status to a failure kind
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ApiFailure::InvalidApiKey,
            429 => ApiFailure::RateLimitExceeded,
            503 => ApiFailure::ModelUnavailable,
            _ => ApiFailure::ServerError(format!("HTTP {status}: {body}")),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::MissingApiKey => write!(f, "missing API key"),
            ApiFailure::InvalidApiKey => write!(f, "invalid API key"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::ModelUnavailable => write!(f, "model unavailable"),
            ApiFailure::NetworkError(e) => write!(f, "network error: {e}"),
            ApiFailure::ServerError(e) => write!(f, "server error: {e}"),
            ApiFailure::MalformedResponse(e) => write!(f, "malformed response: {e}"),
            ApiFailure::EmptyContent => write!(f, "no content in response"),
        }
    }
}
