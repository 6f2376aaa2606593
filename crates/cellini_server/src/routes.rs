//! Route handlers.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cellini_core::{GenerationRequest, GenerationResponse};
use serde::Serialize;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health -- service liveness.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/v1/generate -- run one full orchestration.
async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> ApiResult<Json<GenerationResponse>> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate", %request_id);

    async move {
        info!(
            jewellery_type = %request.jewellery_type,
            video_type = %request.video_type,
            "Received video generation request"
        );
        let response = state.orchestrator.process(&request).await?;
        info!(
            generation_id = %response.generation_id,
            iterations = response.feedback_iterations,
            "Request completed"
        );
        Ok(Json(response))
    }
    .instrument(span)
    .await
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/generate", post(generate_video))
        .with_state(state)
}
