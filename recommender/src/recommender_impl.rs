//! Recommendation pipeline with dependency injection

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use shared::{ProcessId, RecommendationRecord, RecommendationSource, SessionKey, process_debug, process_info, process_warn};

use crate::core::{HistoryTracker, PromptBuilder, correct_hierarchy, dedupe, fallback_recommendations, fallback_response};
use crate::services::parse_ai_payload;
use crate::traits::RecommendationProvider;
use crate::types::{RecommendationRequest, RecommendationResponse};

/// Runs one recommendation cycle: prompt the provider, parse, then apply the
/// consistency layer (dedup against history, soup-hierarchy correction).
pub struct Recommender<P>
where
    P: RecommendationProvider,
{
    provider: Option<P>,
    history: Arc<HistoryTracker>,
    prompts: PromptBuilder,
}

impl<P> Recommender<P>
where
    P: RecommendationProvider,
{
    pub fn new(provider: P, history: Arc<HistoryTracker>) -> Self {
        Self {
            provider: Some(provider),
            history,
            prompts: PromptBuilder::new(),
        }
    }

    /// Recommender with no AI backend; every cycle returns the fallback batch
    pub fn rule_based(history: Arc<HistoryTracker>) -> Self {
        Self {
            provider: None,
            history,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn history(&self) -> &Arc<HistoryTracker> {
        &self.history
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce the next batch for the request's session.
    ///
    /// Never fails: provider and parse errors degrade to the fixed fallback batch.
    pub async fn recommend(&self, request: RecommendationRequest) -> RecommendationResponse {
        let Some(provider) = &self.provider else {
            process_info!(ProcessId::current(), "No AI provider configured, using fallback");
            return self.fallback(&request).await;
        };

        let previous = self.history.previous(&request.session).await;
        let user_message = self.prompts.user_message(&request, &previous);

        let raw = match provider.generate(self.prompts.system_instruction(), &user_message).await {
            Ok(response) => {
                process_debug!(
                    ProcessId::current(),
                    provider = %provider.provider_id(),
                    tokens = response.tokens_used(),
                    "Provider responded"
                );
                response.content
            }
            Err(failure) => {
                process_warn!(
                    ProcessId::current(),
                    provider = %provider.provider_id(),
                    "Provider call failed: {}",
                    failure
                );
                return self.fallback(&request).await;
            }
        };

        let payload = match parse_ai_payload(&raw) {
            Ok(payload) => payload,
            Err(e) => {
                process_warn!(ProcessId::current(), "Unusable model output: {}", e);
                return self.fallback(&request).await;
            }
        };

        let menu = request.cafeteria_menu.as_str();
        let recommendations = self
            .history
            .cycle(&request.session, |previous| {
                correct_hierarchy(menu, dedupe(payload.recommendations, previous))
            })
            .await;

        process_info!(
            ProcessId::current(),
            session = %request.session,
            count = recommendations.len(),
            "Recommendations ready"
        );

        RecommendationResponse {
            request_id: Uuid::new_v4(),
            cafeteria_menu: request.cafeteria_menu.clone(),
            recommendations,
            weather_summary: payload.weather_summary.unwrap_or_else(|| request.weather.summary()),
            weather_info: request.weather,
            mode: payload.mode,
            brief_rationale: payload.brief_rationale,
            source: RecommendationSource::Ai,
            provider: Some(provider.provider_id()),
            generated_at: Utc::now(),
        }
    }

    /// Stored batch for a session
    pub async fn previous(&self, session: &SessionKey) -> Vec<RecommendationRecord> {
        self.history.previous(session).await
    }

    /// Drop a session's stored batch
    pub async fn reset(&self, session: &SessionKey) -> bool {
        self.history.clear(session).await
    }

    async fn fallback(&self, request: &RecommendationRequest) -> RecommendationResponse {
        let recommendations = fallback_recommendations(&request.weather);
        // Fallback batches are recorded but not deduped, so the next AI batch
        // is filtered against them.
        self.history.record(&request.session, recommendations.clone()).await;
        fallback_response(&request.cafeteria_menu, &request.weather, recommendations)
    }
}
