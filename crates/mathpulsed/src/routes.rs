//! API routes for mathpulsed
//!
//! Inference calls block, so the services run on the blocking pool.

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use mathpulse_common::{
    daily_insight, BatchRiskEntry, ClassMember, DailyInsight, LearningPath, LearningPathRequest,
    MathPulseError, Message, ReplySource, RiskAssessment, StudentProfile,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

/// Error body: `{"error": code, "message": text}`
pub struct ApiError(MathPulseError);

impl From<MathPulseError> for ApiError {
    fn from(err: MathPulseError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({
            "error": self.0.code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!("  Blocking task failed: {}", e);
        ApiError(MathPulseError::Internal(e.to_string()))
    })
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub inference_enabled: bool,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        inference_enabled: state.inference_enabled,
    })
}

// ============================================================================
// Chat Routes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    /// Local wall-clock time, HH:MM
    pub timestamp: String,
    pub source: ReplySource,
}

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/api/chat", post(chat))
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(MathPulseError::InvalidRequest("message must not be empty".to_string()).into());
    }

    let tutor = state.tutor.clone();
    let reply = blocking(move || tutor.respond(&req.message, &req.conversation_history)).await?;
    info!("  Chat reply ({:?}, {} chars)", reply.source, reply.message.len());

    Ok(Json(ChatResponse {
        message: reply.message,
        timestamp: chrono::Local::now().format("%H:%M").to_string(),
        source: reply.source,
    }))
}

// ============================================================================
// Risk Routes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StudentsRequest {
    #[serde(default)]
    pub students: Vec<StudentProfile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRiskResponse {
    pub predictions: Vec<BatchRiskEntry>,
}

pub fn risk_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/predict-risk", post(predict_risk))
        .route("/api/predict-risk/batch", post(predict_risk_batch))
}

async fn predict_risk(
    State(state): State<AppStateArc>,
    Json(student): Json<StudentProfile>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let risk = state.risk.clone();
    let assessment = blocking(move || risk.predict(&student)).await?;
    Ok(Json(assessment))
}

async fn predict_risk_batch(
    State(state): State<AppStateArc>,
    Json(req): Json<StudentsRequest>,
) -> Result<Json<BatchRiskResponse>, ApiError> {
    info!("  Batch risk for {} students", req.students.len());
    let risk = state.risk.clone();
    let predictions = blocking(move || risk.predict_batch(&req.students)).await?;
    Ok(Json(BatchRiskResponse { predictions }))
}

// ============================================================================
// Learning Path Routes
// ============================================================================

pub fn learning_path_routes() -> Router<AppStateArc> {
    Router::new().route("/api/learning-path", post(learning_path))
}

async fn learning_path(
    State(state): State<AppStateArc>,
    Json(req): Json<LearningPathRequest>,
) -> Result<Json<LearningPath>, ApiError> {
    let paths = state.paths.clone();
    let path = blocking(move || paths.generate(&req)).await?;
    Ok(Json(path))
}

// ============================================================================
// Analytics Routes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassRequest {
    #[serde(default)]
    pub students: Vec<ClassMember>,
}

pub fn analytics_routes() -> Router<AppStateArc> {
    Router::new().route("/api/analytics/daily-insight", post(daily_insight_handler))
}

async fn daily_insight_handler(Json(req): Json<ClassRequest>) -> Json<DailyInsight> {
    Json(daily_insight(&req.students))
}
