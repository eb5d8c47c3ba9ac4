//! Webserver state shared by every handler

use std::sync::Arc;
use std::time::Instant;

use recommender::{RecommendationProvider, Recommender};

/// Core webserver state
pub struct WebServerState<P>
where
    P: RecommendationProvider,
{
    pub recommender: Recommender<P>,
    pub server_start_time: Instant,
}

impl<P> WebServerState<P>
where
    P: RecommendationProvider,
{
    pub fn new(recommender: Recommender<P>) -> Arc<Self> {
        Arc::new(Self {
            recommender,
            server_start_time: Instant::now(),
        })
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}
