//! Confirmation prompt types.

use serde::{Deserialize, Serialize};

/// A field awaiting human approval, anchored in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPrompt {
    pub field_id: String,
    pub x: i32,
    pub y: i32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmChoice {
    Accept,
    Reject,
}

impl ConfirmChoice {
    pub fn is_accepted(self) -> bool {
        self == ConfirmChoice::Accept
    }
}
