//! Rule-based recommendations used whenever the model path is unavailable

use chrono::Utc;
use uuid::Uuid;

use shared::{RecommendationRecord, RecommendationSource, RecommendationTier, WeatherSnapshot};

use crate::types::RecommendationResponse;

fn korean(tier: RecommendationTier, menu: &str, reason: String, price_range: &str) -> RecommendationRecord {
    RecommendationRecord {
        category: "한식".to_string(),
        reason,
        price_range: price_range.to_string(),
        normalized_search_query: menu.to_string(),
        ..RecommendationRecord::new(tier, "", menu)
    }
}

/// The static three-tier fallback batch
pub fn fallback_recommendations(weather: &WeatherSnapshot) -> Vec<RecommendationRecord> {
    let (weather_menu, feel) = if weather.is_hot() {
        ("냉면", "더운")
    } else {
        ("칼국수", "쌀쌀한")
    };

    vec![
        korean(
            RecommendationTier::Upgrade,
            "프리미엄 한정식",
            "구내식당보다 고급스러운 한식 코스".to_string(),
            "15,000-20,000원",
        ),
        korean(
            RecommendationTier::Alternative,
            "김치찌개",
            "구수하고 든든한 한식".to_string(),
            "8,000-10,000원",
        ),
        korean(
            RecommendationTier::Exception,
            weather_menu,
            format!("{feel} 날씨에 어울리는 메뉴"),
            "8,000-12,000원",
        ),
    ]
}

/// Wrap the fallback batch as a full response
pub fn fallback_response(
    cafeteria_menu: &str,
    weather: &WeatherSnapshot,
    recommendations: Vec<RecommendationRecord>,
) -> RecommendationResponse {
    RecommendationResponse {
        request_id: Uuid::new_v4(),
        cafeteria_menu: cafeteria_menu.to_string(),
        recommendations,
        weather_summary: weather.summary(),
        weather_info: weather.clone(),
        mode: None,
        brief_rationale: None,
        source: RecommendationSource::Fallback,
        provider: None,
        generated_at: Utc::now(),
    }
}
