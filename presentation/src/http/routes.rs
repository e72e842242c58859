//! Route handlers over the orchestration facade

use super::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use infraflow_application::OrchestrationFacade;
use infraflow_domain::Mission;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Build the HTTP router for a facade
pub fn router(facade: Arc<OrchestrationFacade>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/start-mission", post(start_mission))
        .route("/missions", get(list_missions))
        .route("/missions/{id}", get(get_mission))
        .route("/missions/{id}/cancel", post(cancel_mission))
        .with_state(facade)
}

#[derive(Debug, Deserialize)]
pub struct StartMissionRequest {
    /// Missing is treated like blank and rejected by the lifecycle
    #[serde(default)]
    pub mission: String,
}

async fn status(State(facade): State<Arc<OrchestrationFacade>>) -> Json<Value> {
    let status = if facade.readiness().is_ready() {
        "online"
    } else {
        "offline"
    };
    Json(json!({
        "status": status,
        "engine": facade.engine_name(),
    }))
}

async fn start_mission(
    State(facade): State<Arc<OrchestrationFacade>>,
    Json(payload): Json<StartMissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = facade.start_mission(&payload.mission)?;
    debug!(mission_id = %id, "Mission accepted over HTTP");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "mission_accepted",
            "missionId": id.to_string(),
        })),
    ))
}

async fn list_missions(State(facade): State<Arc<OrchestrationFacade>>) -> Json<Vec<Mission>> {
    Json(facade.list_missions())
}

async fn get_mission(
    State(facade): State<Arc<OrchestrationFacade>>,
    Path(id): Path<String>,
) -> Result<Json<Mission>, ApiError> {
    Ok(Json(facade.get_mission_by_str(&id)?))
}

async fn cancel_mission(
    State(facade): State<Arc<OrchestrationFacade>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    facade.cancel_mission_by_str(&id)?;
    Ok(Json(json!({ "status": "cancellation_requested" })))
}
