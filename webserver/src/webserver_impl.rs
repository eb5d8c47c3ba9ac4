//! Main webserver implementation
//!
//! Wires the recommendation pipeline into an Axum router and serves it until
//! a shutdown signal arrives.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use recommender::{RecommendationProvider, Recommender};
use shared::{ProcessId, logging, process_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::api;

/// Main webserver struct with dependency injection
pub struct WebServer<P>
where
    P: RecommendationProvider + 'static,
{
    state: Arc<WebServerState<P>>,
}

impl<P> WebServer<P>
where
    P: RecommendationProvider + 'static,
{
    pub fn new(recommender: Recommender<P>) -> Self {
        Self {
            state: WebServerState::new(recommender),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(api::root::<P>))
            .route("/health", get(api::health_check::<P>))
            .route("/api/recommend-from-cafeteria", post(api::recommend_from_cafeteria::<P>))
            .route("/api/history", get(api::get_history::<P>).delete(api::clear_history::<P>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()) // Allow CORS for development
                    .into_inner(),
            )
            .with_state(Arc::clone(&self.state))
    }

    /// Serve on `addr` until `shutdown` resolves
    pub async fn run<F>(&self, addr: SocketAddr, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {addr}: {e}")))?;

        process_info!(ProcessId::current(), "🌐 Web server listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        logging::log_shutdown(ProcessId::current(), "HTTP server drained");
        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState<P>> {
        &self.state
    }
}
