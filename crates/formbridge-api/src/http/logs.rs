//! Recent log entries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_LOG_LIMIT: usize = 50;
pub const MAX_LOG_LIMIT: usize = 500;

/// Log files are named `<prefix>.<date>.log`.
const LOG_FILE_PREFIX: &str = "formbridge";

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/logs?limit=N
///
/// The last `limit` entries of the newest log file, oldest first. Lines
/// that are not JSON come back as `{"raw": line}`.
pub async fn recent_logs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    if !(1..=MAX_LOG_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_LOG_LIMIT
        )));
    }

    let Some(dir) = state.log_dir() else {
        return Ok(Json(Vec::new()));
    };
    let Some(path) = latest_log_file(dir).await else {
        return Ok(Json(Vec::new()));
    };
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("{}: {}", path.display(), e)))?;
    Ok(Json(tail_entries(&content, limit)))
}

/// Newest `formbridge.*` file in `dir`. Daily file names sort by date.
pub(crate) async fn latest_log_file(dir: &Path) -> Option<PathBuf> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    let mut latest: Option<PathBuf> = None;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
        if is_log && latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }
    latest
}

pub(crate) fn tail_entries(content: &str, limit: usize) -> Vec<Value> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let start = lines.len().saturating_sub(limit);
    lines[start..]
        .iter()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|_| json!({ "raw": line })))
        .collect()
}
