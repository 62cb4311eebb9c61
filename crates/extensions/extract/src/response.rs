//! Extraction response parsing.

use serde_json::Value;

use formbridge_protocols::{EXTRACTION_PROTOCOL_VERSION, ExtractionError, ExtractionResult};

/// Parse the subprocess's stdout into an [`ExtractionResult`].
///
/// The document must be a JSON object with `bbox_dict` and `mapping`
/// objects. A `version` member, when present, must match
/// [`EXTRACTION_PROTOCOL_VERSION`].
pub fn parse_response(stdout: &[u8]) -> Result<ExtractionResult, ExtractionError> {
    let text = std::str::from_utf8(stdout)
        .map_err(|e| ExtractionError::Protocol(format!("output is not UTF-8: {}", e)))?
        .trim();
    if text.is_empty() {
        return Err(ExtractionError::Protocol("empty output".to_string()));
    }

    let document: Value = serde_json::from_str(text)
        .map_err(|e| ExtractionError::Protocol(format!("invalid JSON: {}", e)))?;
    let Value::Object(mut document) = document else {
        return Err(ExtractionError::Protocol(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(version) = document.get("version") {
        if version.as_u64() != Some(u64::from(EXTRACTION_PROTOCOL_VERSION)) {
            return Err(ExtractionError::Protocol(format!(
                "unsupported protocol version {}",
                version
            )));
        }
    }

    let bbox_dict = take_object(&mut document, "bbox_dict")?;
    let mapping = take_object(&mut document, "mapping")?;
    Ok(ExtractionResult { bbox_dict, mapping })
}

fn take_object(
    document: &mut serde_json::Map<String, Value>,
    key: &str,
) -> Result<serde_json::Map<String, Value>, ExtractionError> {
    match document.remove(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ExtractionError::Protocol(format!(
            "`{}` must be an object, got {}",
            key,
            type_name(&other)
        ))),
        None => Err(ExtractionError::Protocol(format!("missing `{}`", key))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
