//! Per-field data errors.

use thiserror::Error;

/// A bounding box entry with the wrong shape.
///
/// Never raised out of the replay engine: the field is skipped and
/// recorded in the report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed field {field_id}: {reason}")]
pub struct MalformedFieldError {
    pub field_id: String,
    pub reason: String,
}

impl MalformedFieldError {
    pub fn new(field_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            reason: reason.into(),
        }
    }
}
