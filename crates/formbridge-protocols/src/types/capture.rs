//! Captured window images.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Rect;

/// Content type of every image produced by the capture service.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// A still image of a window plus the geometry needed to map it back to
/// the screen.
///
/// `image_width`/`image_height` are the pixel dimensions of `image_data`
/// and are independent of `bounds`; together they define the scale factor
/// between image space and screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "CaptureWire", try_from = "CaptureWire")]
pub struct CaptureResult {
    /// Lossless raster (PNG) bytes.
    pub image_data: Vec<u8>,
    pub name: String,
    pub content_type: String,
    /// Best-effort screen rectangle of the captured window.
    pub bounds: Option<Rect>,
    pub image_width: u32,
    pub image_height: u32,
}

impl CaptureResult {
    pub fn to_data_url(&self) -> String {
        encode_data_url(&self.content_type, &self.image_data)
    }
}

/// JSON shape of a capture: the image travels as a data URL.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptureWire {
    data_url: String,
    name: String,
    content_type: String,
    bounds: Option<Rect>,
    image_width: u32,
    image_height: u32,
}

impl From<CaptureResult> for CaptureWire {
    fn from(capture: CaptureResult) -> Self {
        Self {
            data_url: capture.to_data_url(),
            name: capture.name,
            content_type: capture.content_type,
            bounds: capture.bounds,
            image_width: capture.image_width,
            image_height: capture.image_height,
        }
    }
}

impl TryFrom<CaptureWire> for CaptureResult {
    type Error = DataUrlError;

    fn try_from(wire: CaptureWire) -> Result<Self, Self::Error> {
        let (_, image_data) = decode_data_url(&wire.data_url)?;
        Ok(Self {
            image_data,
            name: wire.name,
            content_type: wire.content_type,
            bounds: wire.bounds,
            image_width: wire.image_width,
            image_height: wire.image_height,
        })
    }
}

/// Malformed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid data URL: {0}")]
pub struct DataUrlError(pub String);

/// Encode bytes as a base64 `data:` URL.
pub fn encode_data_url(content_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

/// Decode a base64 `data:` URL into its content type and bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DataUrlError("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DataUrlError("missing ',' separator".to_string()))?;
    let content_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| DataUrlError("only base64 payloads are supported".to_string()))?;
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DataUrlError(e.to_string()))?;
    Ok((content_type.to_string(), data))
}
