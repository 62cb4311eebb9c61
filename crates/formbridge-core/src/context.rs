//! Per-request context.

use std::time::Instant;

use tracing::{Span, info_span};
use uuid::Uuid;

/// State for one automation request, passed explicitly through the
/// pipeline instead of living in globals.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID for tracing and the replay report.
    pub request_id: Uuid,

    /// Window the request targets.
    pub source_id: String,

    /// Ask for confirmation before each field.
    pub confirm_fields: bool,

    started: Instant,
}

impl RequestContext {
    pub fn new(source_id: impl Into<String>, confirm_fields: bool) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            source_id: source_id.into(),
            confirm_fields,
            started: Instant::now(),
        }
    }

    /// Span wrapping everything done for this request.
    pub fn span(&self) -> Span {
        info_span!(
            "replay",
            request_id = %self.request_id,
            source_id = %self.source_id
        )
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
