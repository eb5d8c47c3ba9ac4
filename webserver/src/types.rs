//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

use shared::{RecommendationRecord, SessionKey, WeatherSnapshot};

fn default_prefer_external() -> bool {
    true
}

/// Body of `POST /api/recommend-from-cafeteria`
#[derive(Debug, Clone, Deserialize)]
pub struct CafeteriaRecommendRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cafeteria_menu: String,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(default = "default_prefer_external")]
    pub prefer_external: bool,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl CafeteriaRecommendRequest {
    /// Caller weather, with a top-level `location` taking precedence
    pub fn weather_snapshot(&self) -> WeatherSnapshot {
        let mut weather = self.weather.clone().unwrap_or_default();
        if let Some(location) = self.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            weather.location = location.to_string();
        }
        weather
    }

    pub fn session(&self) -> SessionKey {
        SessionKey::from_optional(self.session_id.as_deref())
    }
}

/// `?session_id=` on the history endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

impl SessionQuery {
    pub fn session(&self) -> SessionKey {
        SessionKey::from_optional(self.session_id.as_deref())
    }
}

/// `{"success": true, "data": …}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Payload of `GET /api/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub session_id: SessionKey,
    pub recommendations: Vec<RecommendationRecord>,
}

/// Payload of `DELETE /api/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryCleared {
    pub session_id: SessionKey,
    pub cleared: bool,
}
