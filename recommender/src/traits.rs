//! Recommender trait definitions for dependency injection

use async_trait::async_trait;

use shared::{ApiFailure, ProviderId};
use crate::types::ProviderResponse;

/// Generative-AI backend that turns prompts into raw recommendation text
#[mockall::automock]
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Which provider this is, for logging and response metadata
    fn provider_id(&self) -> ProviderId;

    /// Send the system instruction and user message, returning the raw model text
    async fn generate(&self, system_instruction: &str, user_message: &str) -> Result<ProviderResponse, ApiFailure>;
}
