//! Caller-supplied weather snapshot

use serde::{Deserialize, Serialize};

/// Weather at the user's location when the recommendation was requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_c: f64,
    pub sky_condition: String,
    pub precipitation: String,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            location: "서울".to_string(),
            temperature_c: 20.0,
            sky_condition: "맑음".to_string(),
            precipitation: "없음".to_string(),
        }
    }
}

impl WeatherSnapshot {
    pub fn is_hot(&self) -> bool {
        self.temperature_c > 25.0
    }

    pub fn is_cold(&self) -> bool {
        self.temperature_c < 10.0
    }

    pub fn is_wet(&self) -> bool {
        self.sky_condition.contains('비') || self.sky_condition.contains('눈')
    }

    /// Flavor profile hinted to the model
    pub fn flavor_hint(&self) -> &'static str {
        if self.is_hot() {
            "시원함, 깔끔함, 상큼함"
        } else if self.is_cold() {
            "따뜻함, 든든함, 얼큰함"
        } else if self.is_wet() {
            "따뜻함, 부드러움, 위로"
        } else {
            "균형잡힘, 신선함, 다양함"
        }
    }

    pub fn summary(&self) -> String {
        format!("{}°C, {}", self.temperature_c, self.sky_condition)
    }
}
