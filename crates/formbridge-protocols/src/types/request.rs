//! Automation requests and replay reports.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BoxDictionary, FieldMapping, Rect};

/// Result of an extraction: where the fields are and what to type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub bbox_dict: BoxDictionary,
    pub mapping: FieldMapping,
}

/// Everything needed to replay input without re-capturing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRequest {
    pub mapping: FieldMapping,
    pub bbox_dict: BoxDictionary,
    #[serde(rename = "sourceId")]
    pub source_id: String,
    #[serde(default)]
    pub bounds: Option<Rect>,
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
    /// Overrides the configured per-field confirmation default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
}

/// A click (and optional text) at pre-computed absolute screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectAction {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub text: String,
}

/// What happened when bringing the target window forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ActivationOutcome {
    Activated,
    /// The platform has no activation support; replay continues.
    Unsupported,
    /// The source id did not resolve to a live window.
    SourceNotFound,
    /// Activation was attempted and failed; replay continues.
    Failed(String),
}

/// Why a field was not typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingBox,
    MalformedBox,
    Rejected,
    ConfirmationFailed,
    InputFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedField {
    pub field_id: String,
    pub reason: SkipReason,
    pub detail: String,
}

/// Outcome of one replay run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub request_id: Uuid,
    pub activation: ActivationOutcome,
    pub typed: Vec<String>,
    pub skipped: Vec<SkippedField>,
}

impl ReplayReport {
    pub fn new(request_id: Uuid, activation: ActivationOutcome) -> Self {
        Self {
            request_id,
            activation,
            typed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn skip(&mut self, field_id: &str, reason: SkipReason, detail: impl Into<String>) {
        self.skipped.push(SkippedField {
            field_id: field_id.to_string(),
            reason,
            detail: detail.into(),
        });
    }
}
