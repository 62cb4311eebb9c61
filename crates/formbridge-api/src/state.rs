//! Application state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use formbridge_core::Pipeline;

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    start_time: Instant,
    request_count: AtomicU64,
    log_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            log_dir: None,
        }
    }

    /// Directory holding the daily JSON log files served by `/logs`.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}
