//! Window capture at a canonical resolution.

use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};
use xcap::Window;
use xcap::image::imageops::FilterType;
use xcap::image::{DynamicImage, ImageFormat, RgbaImage};

use formbridge_protocols::{CaptureError, CaptureResult, CaptureService, IMAGE_CONTENT_TYPE, Rect};

/// Captures windows through xcap and rescales them to fit the canonical
/// capture size, so pixel-space math does not depend on live window size.
#[derive(Debug, Clone)]
pub struct XcapCaptureService {
    width: u32,
    height: u32,
}

impl XcapCaptureService {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl CaptureService for XcapCaptureService {
    fn capture(&self, id: &str) -> Result<CaptureResult, CaptureError> {
        let windows = Window::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        let window = windows
            .iter()
            .find(|w| w.id().to_string() == id)
            .ok_or_else(|| CaptureError::NotFound(id.to_string()))?;
        let source_name = window.title().to_string();

        let raw = window
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let image = scale_to_fit(raw, self.width, self.height)?;
        let (image_width, image_height) = (image.width(), image.height());
        let image_data = encode_png(&image)?;

        let bounds = match_bounds(
            &source_name,
            windows.iter().map(|w| {
                (
                    w.title().to_string(),
                    Rect::new(w.x(), w.y(), w.width(), w.height()),
                )
            }),
        );
        if bounds.is_none() {
            warn!(
                "No live window titled {:?}; coordinates will not be rescaled",
                source_name
            );
        }

        info!(
            "Captured window {} ({}x{}, {} bytes)",
            id,
            image_width,
            image_height,
            image_data.len()
        );

        Ok(CaptureResult {
            image_data,
            name: capture_name(),
            content_type: IMAGE_CONTENT_TYPE.to_string(),
            bounds,
            image_width,
            image_height,
        })
    }
}

/// Largest size with the source aspect ratio that fits in `max_w`x`max_h`.
pub(crate) fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = f64::min(
        max_w as f64 / width as f64,
        max_h as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

fn scale_to_fit(raw: RgbaImage, max_w: u32, max_h: u32) -> Result<DynamicImage, CaptureError> {
    let (w, h) = fit_within(raw.width(), raw.height(), max_w, max_h);
    if w == 0 || h == 0 {
        return Err(CaptureError::CaptureFailed(
            "captured an empty image".to_string(),
        ));
    }
    let image = DynamicImage::ImageRgba8(raw);
    if (w, h) == (image.width(), image.height()) {
        return Ok(image);
    }
    debug!(
        "Scaling capture {}x{} -> {}x{}",
        image.width(),
        image.height(),
        w,
        h
    );
    Ok(image.resize_exact(w, h, FilterType::Triangle))
}

pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// First window whose trimmed title equals the trimmed source name.
pub(crate) fn match_bounds<I>(source_name: &str, windows: I) -> Option<Rect>
where
    I: IntoIterator<Item = (String, Rect)>,
{
    let wanted = source_name.trim();
    if wanted.is_empty() {
        return None;
    }
    windows
        .into_iter()
        .find(|(title, _)| title.trim() == wanted)
        .map(|(_, rect)| rect)
}

fn capture_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("window_screenshot_{}.png", millis)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
