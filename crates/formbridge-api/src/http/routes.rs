//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{
    automate, automate_actions, capture_window, extract, list_windows, run_pipeline,
    window_screenshot,
};
use crate::http::logs::recent_logs;
use crate::http::monitoring;
use crate::state::AppState;

/// Create the API router.
///
/// ## Route Structure
///
/// ```text
/// /api/v1
///   GET    /health                   - Liveness and uptime
///   GET    /logs?limit=N             - Recent log entries
///   GET    /windows                  - List capturable windows
///   POST   /windows/{id}/capture     - Capture as JSON (data URL + geometry)
///   GET    /windows/{id}/screenshot  - Capture as raw PNG
///   POST   /extract                  - Run the extraction program
///   POST   /automate                 - Replay a field mapping
///   POST   /automate/actions         - Replay absolute screen actions
///   POST   /pipeline                 - Capture, extract and replay
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(monitoring::health_check))
        .route("/logs", get(recent_logs))
        .route("/windows", get(list_windows))
        .route("/windows/{id}/capture", post(capture_window))
        .route("/windows/{id}/screenshot", get(window_screenshot))
        .route("/extract", post(extract))
        .route("/automate", post(automate))
        .route("/automate/actions", post(automate_actions))
        .route("/pipeline", post(run_pipeline))
        .with_state(state);

    // The host UI is served from its own origin.
    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
