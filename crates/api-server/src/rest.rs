//! REST handlers for the campaign proxy and operational endpoints.

use crate::orchestrate;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use outreach_core::types::{CampaignId, CampaignRequest};
use outreach_smartlead::SmartleadClient;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

/// Fallback error text when upstream did not report one of its own.
const GENERIC_FAILURE_MESSAGE: &str =
    "Error creating campaign or adding leads. Please try again.";

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SmartleadClient>,
    pub start_time: Instant,
}

/// POST /api/create-campaign — create a campaign and attach its leads.
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CreateCampaignResponse>, (StatusCode, Json<ErrorResponse>)> {
    match orchestrate::create_campaign_with_leads(&state.client, request).await {
        Ok(outcome) => {
            metrics::counter!("api.campaigns.created").increment(1);
            Ok(Json(CreateCampaignResponse {
                message: outcome.message,
            }))
        }
        Err(e) => {
            error!(error = %e, "Campaign orchestration failed");
            metrics::counter!("api.campaigns.failed").increment(1);

            let status = e
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            // campaign_id is present exactly when the campaign exists
            // upstream despite the failure, so callers can remedy manually.
            Err((
                status,
                Json(ErrorResponse {
                    error: e
                        .upstream_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
                    campaign_id: e.created_campaign_id(),
                }),
            ))
        }
    }
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live — Liveness probe for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
pub struct CreateCampaignResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
