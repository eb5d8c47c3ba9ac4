//! Placeholder nearby-restaurant candidates
//!
//! There is no map lookup behind these; they give the model a plausible
//! candidate list shaped by the temperature band.

use shared::WeatherSnapshot;

use crate::types::NearbyOption;

fn option(name: &str, category: &str, walking_min: u32, price_level: &str, details: &str) -> NearbyOption {
    NearbyOption {
        name: name.to_string(),
        category: category.to_string(),
        walking_min,
        price_level: price_level.to_string(),
        open_now: true,
        details: details.to_string(),
    }
}

/// Candidates for the current weather, always ending with the in-house option
pub fn nearby_options(cafeteria_menu: &str, weather: &WeatherSnapshot) -> Vec<NearbyOption> {
    let mut options = if weather.is_hot() {
        vec![
            option("시원한 냉면가게", "한식/면", 7, "₩₩", "평양냉면, 비빔냉면"),
            option("프레시 샐러드 바", "샐러드/서양식", 4, "₩₩", "닭가슴살 샐러드, 저칼로리"),
        ]
    } else if weather.is_cold() {
        vec![
            option("얼큰 김치찌개집", "한식/찌개", 5, "₩", "김치찌개, 순두부찌개"),
            option("사골국밥 전문점", "한식/국밥", 8, "₩₩", "진한 사골국밥"),
        ]
    } else {
        vec![
            option("프리미엄 한식당", "한식/정식", 10, "₩₩₩", "계절 반찬 정식"),
            option("맛있는 일식집", "일식/초밥", 6, "₩₩", "런치 초밥 세트"),
        ]
    };

    options.push(option(
        "구내식당 대체 메뉴",
        "사내",
        0,
        "₩",
        &format!("{cafeteria_menu}의 대안"),
    ));

    options
}
