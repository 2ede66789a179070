//! HTTP server for mathpulsed

use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use mathpulse_common::{
    InferenceClient, LearningPathService, MathPulseConfig, RiskPredictionService, TutorService,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Largest request body accepted
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub tutor: Arc<TutorService>,
    pub risk: Arc<RiskPredictionService>,
    pub paths: Arc<LearningPathService>,
    pub inference_enabled: bool,
    pub start_time: Instant,
}

impl AppState {
    /// Wire every service to one inference client
    pub fn new(client: Arc<dyn InferenceClient>, config: &MathPulseConfig) -> Self {
        let inference = &config.inference;
        Self {
            tutor: Arc::new(TutorService::new(
                client.clone(),
                inference.chat_model.clone(),
                config.tutor.clone(),
            )),
            risk: Arc::new(RiskPredictionService::new(
                client.clone(),
                inference.classification_model.clone(),
            )),
            paths: Arc::new(LearningPathService::new(client, inference.chat_model.clone())),
            inference_enabled: inference.enabled,
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes and layers
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::chat_routes())
        .merge(routes::risk_routes())
        .merge(routes::learning_path_routes())
        .merge(routes::analytics_routes())
        .with_state(Arc::new(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("  Listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
