//! Integration tests for the recommendation pipeline
//!
//! These drive `Recommender` end to end with a mocked provider and a real
//! history tracker.


use std::sync::Arc;

use fixtures::*;
use recommender::core::HistoryTracker;
use recommender::{MockRecommendationProvider, Recommender};
use shared::{ApiFailure, ProviderId, RecommendationSource, RecommendationTier, SessionKey};

fn menus(response: &recommender::RecommendationResponse) -> Vec<&str> {
    response.recommendations.iter().map(|r| r.menu_name.as_str()).collect()
}

#[tokio::test]
async fn test_ai_batch_passes_through_for_non_soup_menu() {
    let provider = create_scripted_provider(vec![create_model_output(&[
        ("상위호환", "한우 정육식당", "한우 불고기"),
        ("비슷한카테고리", "제육 명가", "제육볶음"),
        ("날씨기반", "칼국수 집", "바지락 칼국수"),
    ])]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let response = recommender.recommend(create_test_request("불고기 덮밥", "team-a")).await;

    assert_eq!(response.source, RecommendationSource::Ai);
    assert_eq!(response.provider, Some(ProviderId::Gemini));
    assert_eq!(menus(&response), vec!["한우 불고기", "제육볶음", "바지락 칼국수"]);
    assert_eq!(response.weather_summary, "8°C, 흐림");
    assert_eq!(response.mode.as_ref().map(|m| m.name.as_str()), Some("CAM"));

    let stored = recommender.previous(&SessionKey::new("team-a")).await;
    assert_eq!(stored, response.recommendations);
}

#[tokio::test]
async fn test_soup_menu_upgrade_is_corrected() {
    let provider = create_scripted_provider(vec![create_model_output(&[
        ("상위호환", "제육 명가", "제육볶음"),
        ("비슷한카테고리", "순두부 전문점", "순두부찌개"),
        ("날씨기반", "평양면옥", "물냉면"),
    ])]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let response = recommender.recommend(create_test_request("김치찌개", "team-a")).await;

    assert_eq!(menus(&response), vec!["순두부찌개", "제육볶음", "물냉면"]);
    let tiers: Vec<_> = response.recommendations.iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![
            RecommendationTier::Upgrade,
            RecommendationTier::Alternative,
            RecommendationTier::Exception,
        ]
    );
}

#[tokio::test]
async fn test_second_cycle_drops_repeats_of_first() {
    let provider = create_scripted_provider(vec![
        create_model_output(&[
            ("상위호환", "A식당", "갈비탕"),
            ("비슷한카테고리", "B식당", "육개장"),
            ("날씨기반", "C식당", "냉면"),
        ]),
        create_model_output(&[
            ("상위호환", "A식당", "갈비탕"),
            ("비슷한카테고리", "D식당", "설렁탕"),
            ("날씨기반", "E식당", "비빔밥"),
        ]),
    ]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    recommender.recommend(create_test_request("제육덮밥", "team-a")).await;
    let second = recommender.recommend(create_test_request("제육덮밥", "team-a")).await;

    assert_eq!(menus(&second), vec!["설렁탕", "비빔밥"]);
    assert_eq!(
        recommender.previous(&SessionKey::new("team-a")).await,
        second.recommendations
    );
}

#[tokio::test]
async fn test_all_repeats_return_the_batch_unfiltered() {
    let batch = create_model_output(&[("상위호환", "A식당", "갈비탕"), ("날씨기반", "C식당", "냉면")]);
    let provider = create_scripted_provider(vec![batch.clone(), batch]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let first = recommender.recommend(create_test_request("돈까스", "team-a")).await;
    let second = recommender.recommend(create_test_request("돈까스", "team-a")).await;

    assert_eq!(menus(&second), menus(&first));
}

#[tokio::test]
async fn test_previous_batch_is_sent_as_avoid_recent() {
    let mut provider = MockRecommendationProvider::new();
    provider.expect_provider_id().return_const(ProviderId::Gemini);

    let mut seq = mockall::Sequence::new();
    provider
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, user| user.contains("\"avoid_recent\": []"))
        .returning(|_, _| {
            Ok(create_provider_response(create_model_output(&[("상위호환", "A식당", "갈비탕")])))
        });
    provider
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, user| user.contains("\"restaurant\": \"A식당\"") && user.contains("\"menu\": \"갈비탕\""))
        .returning(|_, _| {
            Ok(create_provider_response(create_model_output(&[("상위호환", "B식당", "곰탕")])))
        });

    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));
    recommender.recommend(create_test_request("제육덮밥", "team-a")).await;
    let second = recommender.recommend(create_test_request("제육덮밥", "team-a")).await;

    assert_eq!(menus(&second), vec!["곰탕"]);
}

#[tokio::test]
async fn test_sessions_do_not_share_history() {
    let batch = create_model_output(&[("상위호환", "A식당", "갈비탕"), ("날씨기반", "C식당", "냉면")]);
    let provider = create_scripted_provider(vec![batch.clone(), batch]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let a = recommender.recommend(create_test_request("돈까스", "team-a")).await;
    let b = recommender.recommend(create_test_request("돈까스", "team-b")).await;

    assert_eq!(menus(&a), vec!["갈비탕", "냉면"]);
    assert_eq!(menus(&b), vec!["갈비탕", "냉면"]);
}

#[tokio::test]
async fn test_provider_failure_falls_back_and_records_batch() {
    let mut provider = MockRecommendationProvider::new();
    provider.expect_provider_id().return_const(ProviderId::Gemini);
    provider
        .expect_generate()
        .times(1)
        .returning(|_, _| Err(ApiFailure::RateLimitExceeded));

    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));
    let response = recommender.recommend(create_test_request("김치찌개", "team-a")).await;

    assert_eq!(response.source, RecommendationSource::Fallback);
    assert_eq!(response.provider, None);
    assert_eq!(menus(&response), vec!["프리미엄 한정식", "김치찌개", "칼국수"]);
    assert_eq!(response.weather_summary, "8°C, 흐림");
    assert_eq!(
        recommender.previous(&SessionKey::new("team-a")).await,
        response.recommendations
    );
}

#[tokio::test]
async fn test_unparseable_output_falls_back() {
    let provider = create_scripted_provider(vec!["죄송합니다. 지금은 추천이 어렵습니다.".to_string()]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let response = recommender.recommend(create_test_request("김치찌개", "team-a")).await;

    assert_eq!(response.source, RecommendationSource::Fallback);
    assert_eq!(response.recommendations.len(), 3);
}

#[tokio::test]
async fn test_empty_recommendation_list_falls_back() {
    let provider = create_scripted_provider(vec![r#"{"recommendations": []}"#.to_string()]);
    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));

    let response = recommender.recommend(create_test_request("김치찌개", "team-a")).await;
    assert_eq!(response.source, RecommendationSource::Fallback);
}

#[tokio::test]
async fn test_fallback_history_filters_next_ai_batch() {
    let mut provider = MockRecommendationProvider::new();
    provider.expect_provider_id().return_const(ProviderId::Gemini);
    let mut seq = mockall::Sequence::new();
    provider
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(ApiFailure::ModelUnavailable));
    provider
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Ok(create_provider_response(create_model_output(&[
                ("비슷한카테고리", "", "김치찌개"),
                ("날씨기반", "칼국수 집", "바지락 칼국수"),
            ])))
        });

    let recommender = Recommender::new(provider, Arc::new(HistoryTracker::new()));
    recommender.recommend(create_test_request("제육덮밥", "team-a")).await;
    let second = recommender.recommend(create_test_request("제육덮밥", "team-a")).await;

    assert_eq!(second.source, RecommendationSource::Ai);
    assert_eq!(menus(&second), vec!["바지락 칼국수"]);
}

#[tokio::test]
async fn test_rule_based_recommender_uses_fallback() {
    let history = Arc::new(HistoryTracker::new());
    let recommender = Recommender::<MockRecommendationProvider>::rule_based(Arc::clone(&history));
    assert!(!recommender.has_provider());

    let mut request = create_test_request("냉모밀", "team-a");
    request.weather.temperature_c = 31.0;
    let response = recommender.recommend(request).await;

    assert_eq!(response.source, RecommendationSource::Fallback);
    assert_eq!(menus(&response), vec!["프리미엄 한정식", "김치찌개", "냉면"]);
    assert_eq!(history.sessions().await, vec![SessionKey::new("team-a")]);
}

#[tokio::test]
async fn test_reset_clears_session() {
    let recommender = Recommender::<MockRecommendationProvider>::rule_based(Arc::new(HistoryTracker::new()));
    let session = SessionKey::new("team-a");

    recommender.recommend(create_test_request("김치찌개", "team-a")).await;
    assert!(recommender.reset(&session).await);
    assert!(recommender.previous(&session).await.is_empty());
    assert!(!recommender.reset(&session).await);
}
