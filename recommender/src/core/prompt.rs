//! System instruction and per-request message for the model

use serde_json::json;

use shared::RecommendationRecord;

use super::nearby::nearby_options;
use crate::types::RecommendationRequest;

/// Default lunch budget in won
const DEFAULT_BUDGET: u32 = 15_000;

const SYSTEM_INSTRUCTION: &str = r#"너는 점심 메뉴 추천 전문가로서, 영양·맛·날씨·이동거리·실제 후보 식당을 함께 고려한다.
항상 구조화된 JSON만 출력하며, code block/설명/이모지는 사용하지 않는다.

### 목표
- 입력: 오늘자 구내식당 메뉴, 날씨, 선호 조건, 인근 후보 식당 목록, 최근 추천 목록(avoid_recent)
- 입력으로 주어진 후보 식당만 사용해 최대 3개의 추천안을 제시한다 (상위호환·비슷한카테고리·날씨기반 각 1개씩, 가능하면).
- 추천 이유는 친근한 존댓말 1~2문장이며 맛·재료·영양·날씨 중 최소 2개 근거를 포함한다.

### 규칙
1. 입력 메뉴가 여러 개면 대표 메뉴(찌개/탕/덮밥 등 국물·조리메뉴 우선)를 기준으로 삼는다.
2. prefer_external이 true이면 외부 식당 위주로 추천하고, 최소 2개는 도보 15분 이내 외부 식당이어야 한다.
3. 거리: near 0~5분, mid 6~15분, 15분 초과 식당은 제외한다.
4. 날씨: 더운 날은 시원한 메뉴, 추운 날은 따뜻한 국물, 비 오는 날은 부침개·전골 등 실내 메뉴.
5. 카테고리:
   - 상위호환: 구내식당 메뉴의 고급 버전. 국물 메뉴의 상위호환은 반드시 국물 메뉴여야 하며 볶음·튀김·구이·마라 계열은 금지.
   - 비슷한카테고리: 같은 계열의 다른 메뉴.
   - 날씨기반: 날씨나 기분을 반영한 완전히 다른 계열의 메뉴.
   - 동일한 (식당, 메뉴) 조합을 여러 카테고리에 중복하지 않는다.
6. avoid_recent에 있는 (식당, 메뉴) 조합은 다시 추천하지 않는다.
7. 오타나 유사어는 의미에 맞게 보정한다.
8. 필수 정보가 부족하면 추측하지 말고 need_more_info=true와 missing 배열을 반환한다.
9. 사고과정은 숨기고 brief_rationale에 1~2문장 요약만 제공한다."#;

/// Builds the texts sent to the model
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    budget: u32,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self { budget: DEFAULT_BUDGET }
    }

    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    pub fn system_instruction(&self) -> &'static str {
        SYSTEM_INSTRUCTION
    }

    /// JSON input block describing this request
    pub fn input_block(
        &self,
        request: &RecommendationRequest,
        previous: &[RecommendationRecord],
    ) -> serde_json::Value {
        let weather = &request.weather;
        let avoid_recent: Vec<_> = previous
            .iter()
            .map(|r| json!({ "restaurant": r.restaurant_name, "menu": r.menu_name }))
            .collect();
        let avoid: Vec<&str> = if request.prefer_external { vec!["구내식당"] } else { Vec::new() };
        let allergy: Vec<String> = Vec::new();

        json!({
            "prefer_external": request.prefer_external,
            "today_cafeteria_menu": request.cafeteria_menu,
            "current_weather": format!("{}℃, {}", weather.temperature_c, weather.sky_condition),
            "precipitation": weather.precipitation,
            "user_prefs": {
                "budget": self.budget,
                "avoid": avoid,
                "allergy": allergy,
                "favorite_flavor": weather.flavor_hint(),
            },
            "location": weather.location,
            "nearby_options": nearby_options(&request.cafeteria_menu, weather),
            "avoid_recent": avoid_recent,
        })
    }

    /// Full user message: input block plus output contract
    pub fn user_message(&self, request: &RecommendationRequest, previous: &[RecommendationRecord]) -> String {
        let input = self.input_block(request, previous);
        let pretty = serde_json::to_string_pretty(&input).unwrap_or_else(|_| input.to_string());

        format!(
            r#"## 점심 메뉴 추천 요청 데이터
아래 입력 데이터를 분석하여 최적의 점심 메뉴를 추천하고, 결과를 JSON 형식으로 반환하세요.
---
{pretty}
---

**중요 규칙**:
1. menu_name 필드는 지도 검색용으로 수식어 없이 간결하게 작성하세요 (예: "생선구이", "냉면", "김치찌개").
2. display_name 필드는 사용자에게 보여줄 풍부한 표현으로 작성하세요 (예: "따뜻한 생선구이 정식").
3. 각 카테고리별로 서로 다른 메뉴를 추천하세요.

**응답 형식**:
{{
  "mode": {{ "name": "CAM 또는 default", "reason": "모드 선택 이유" }},
  "cafeteria_menu": "{menu}",
  "recommendations": [
    {{
      "type": "상위호환 | 비슷한카테고리 | 날씨기반",
      "restaurant_name": "후보 식당 이름",
      "place_id": "",
      "minutes_away": 5,
      "menu_name": "간결한 메뉴명",
      "display_name": "풍부한 표현의 메뉴명",
      "category": "음식 카테고리",
      "reason": "추천 이유 (50자 이내)",
      "price_range": "가격대",
      "normalized_search_query": "지도 검색어",
      "alt_queries": ["대체 검색어"],
      "category_group_code": "FD6"
    }}
  ],
  "weather_summary": "날씨 요약",
  "brief_rationale": "한두 문장 요약"
}}"#,
            menu = request.cafeteria_menu,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RecommendationTier, WeatherSnapshot};

    fn request(prefer_external: bool) -> RecommendationRequest {
        RecommendationRequest {
            prefer_external,
            ..RecommendationRequest::new("김치찌개", WeatherSnapshot { temperature_c: 5.0, ..WeatherSnapshot::default() })
        }
    }

    #[test]
    fn test_input_block_carries_request_fields() {
        let block = PromptBuilder::new().input_block(&request(true), &[]);
        assert_eq!(block["today_cafeteria_menu"], "김치찌개");
        assert_eq!(block["current_weather"], "5℃, 맑음");
        assert_eq!(block["user_prefs"]["budget"], 15_000);
        assert_eq!(block["user_prefs"]["avoid"][0], "구내식당");
        assert_eq!(block["user_prefs"]["favorite_flavor"], "따뜻함, 든든함, 얼큰함");
        assert_eq!(block["nearby_options"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_avoid_list_empty_without_cam_mode() {
        let block = PromptBuilder::new().with_budget(12_000).input_block(&request(false), &[]);
        assert!(block["user_prefs"]["avoid"].as_array().unwrap().is_empty());
        assert_eq!(block["user_prefs"]["budget"], 12_000);
    }

    #[test]
    fn test_previous_batch_becomes_avoid_recent() {
        let previous = vec![RecommendationRecord::new(RecommendationTier::Upgrade, "한우국밥", "소고기국밥")];
        let block = PromptBuilder::new().input_block(&request(true), &previous);
        assert_eq!(block["avoid_recent"][0]["restaurant"], "한우국밥");
        assert_eq!(block["avoid_recent"][0]["menu"], "소고기국밥");
    }

    #[test]
    fn test_user_message_embeds_input_and_menu() {
        let message = PromptBuilder::new().user_message(&request(true), &[]);
        assert!(message.contains("\"today_cafeteria_menu\": \"김치찌개\""));
        assert!(message.contains("\"cafeteria_menu\": \"김치찌개\""));
        assert!(PromptBuilder::new().system_instruction().contains("상위호환"));
    }
}
