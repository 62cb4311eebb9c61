//! Detected fields: bounding boxes and the values to type into them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MalformedFieldError;

/// Field-id to value to be typed, in caller order.
pub type FieldMapping = serde_json::Map<String, Value>;

/// Field-id to raw bounding box, as produced by extraction.
pub type BoxDictionary = serde_json::Map<String, Value>;

/// Image-pixel rectangle `(x1, y1, x2, y2)` with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Build a box, normalising reversed corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Parse the raw JSON entry for `field_id`.
    ///
    /// The entry must be an array of exactly four numeric components.
    /// Numeric strings are accepted.
    pub fn from_value(field_id: &str, value: &Value) -> Result<Self, MalformedFieldError> {
        let items = value.as_array().ok_or_else(|| {
            MalformedFieldError::new(field_id, format!("expected an array, got {}", value))
        })?;
        if items.len() != 4 {
            return Err(MalformedFieldError::new(
                field_id,
                format!("expected 4 components, got {}", items.len()),
            ));
        }

        let mut coords = [0.0f64; 4];
        for (slot, item) in coords.iter_mut().zip(items) {
            *slot = numeric(item).ok_or_else(|| {
                MalformedFieldError::new(field_id, format!("non-numeric component {}", item))
            })?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    /// Pixel-space center, rounded to the nearest integer.
    pub fn center(&self) -> (f64, f64) {
        (
            round_half_up((self.x1 + self.x2) / 2.0),
            round_half_up((self.y1 + self.y2) / 2.0),
        )
    }
}

/// Nearest integer, ties toward positive infinity (`-2.5` -> `-2`).
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Text typed for a mapping value: strings verbatim, everything else as
/// its JSON text. Whole-number floats drop the fraction (`36.0` types `36`).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
