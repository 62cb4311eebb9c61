//! Pipeline API handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;

use formbridge_core::RunReport;
use formbridge_protocols::{
    AutomationRequest, CaptureResult, DirectAction, ExtractionResult, ReplayReport, WindowHandle,
    decode_data_url,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Request to run the extraction program on an already captured image.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// `data:image/png;base64,...`
    pub screenshot: Option<String>,

    /// Caller context handed to the extraction program.
    pub data_to_write: Option<serde_json::Value>,
}

/// Request to replay pre-computed screen positions.
#[derive(Debug, Deserialize)]
pub struct ActionsRequest {
    pub window_id: String,
    pub actions: Vec<DirectAction>,
}

/// Request to capture, extract and replay in one call.
#[derive(Debug, Deserialize)]
pub struct PipelineRequest {
    #[serde(rename = "sourceId")]
    pub source_id: String,

    #[serde(default)]
    pub context: serde_json::Value,

    pub confirm: Option<bool>,
}

/// GET /api/v1/windows
pub async fn list_windows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WindowHandle>>, ApiError> {
    Ok(Json(state.pipeline.list_windows().await?))
}

/// POST /api/v1/windows/{id}/capture
pub async fn capture_window(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CaptureResult>, ApiError> {
    Ok(Json(state.pipeline.capture(&id).await?))
}

/// GET /api/v1/windows/{id}/screenshot
///
/// Same capture, served as the raw image.
pub async fn window_screenshot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let capture = state.pipeline.capture(&id).await?;
    Ok((
        [(header::CONTENT_TYPE, capture.content_type)],
        capture.image_data,
    ))
}

/// POST /api/v1/extract
pub async fn extract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(req) = payload?;
    let (Some(screenshot), Some(context)) = (req.screenshot, req.data_to_write) else {
        return Err(ApiError::BadRequest(
            "screenshot and data_to_write are required".to_string(),
        ));
    };
    let (_, image) =
        decode_data_url(&screenshot).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!("Extract request ({} bytes)", image.len());
    Ok(Json(state.pipeline.extract(&image, &context).await?))
}

/// POST /api/v1/automate
pub async fn automate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AutomationRequest>, JsonRejection>,
) -> Result<Json<ReplayReport>, ApiError> {
    let Json(req) = payload?;
    state.increment_requests();
    info!(
        "Automate request: source={} fields={}",
        req.source_id,
        req.mapping.len()
    );
    Ok(Json(state.pipeline.replay(req).await?))
}

/// POST /api/v1/automate/actions
pub async fn automate_actions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActionsRequest>, JsonRejection>,
) -> Result<Json<ReplayReport>, ApiError> {
    let Json(req) = payload?;
    state.increment_requests();
    info!(
        "Direct action request: window={} actions={}",
        req.window_id,
        req.actions.len()
    );
    Ok(Json(
        state
            .pipeline
            .replay_actions(&req.window_id, req.actions)
            .await?,
    ))
}

/// POST /api/v1/pipeline
pub async fn run_pipeline(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PipelineRequest>, JsonRejection>,
) -> Result<Json<RunReport>, ApiError> {
    let Json(req) = payload?;
    state.increment_requests();
    Ok(Json(
        state
            .pipeline
            .run(&req.source_id, &req.context, req.confirm)
            .await?,
    ))
}
