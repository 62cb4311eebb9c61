//! Image-pixel to screen coordinate mapping.
//!
//! Pure functions; no I/O.

use formbridge_protocols::{BoundingBox, Rect, ScreenPoint, round_half_up};

/// Screen position of the center of `bbox`.
///
/// The pixel-space center is rounded first. With `bounds` it is rescaled
/// into the window's real screen rectangle:
/// `bounds.x + center_x / image_width * bounds.width` (same for y).
/// Without `bounds` (or with a zero-sized image) the raw pixel center is
/// returned, which is only correct when capture and display resolutions
/// coincide.
pub fn map_to_screen(
    bbox: &BoundingBox,
    image_width: u32,
    image_height: u32,
    bounds: Option<&Rect>,
) -> ScreenPoint {
    let (cx, cy) = bbox.center();
    map_point(cx, cy, image_width, image_height, bounds)
}

/// Map an arbitrary image-pixel point the same way as [`map_to_screen`].
pub fn map_point(
    x: f64,
    y: f64,
    image_width: u32,
    image_height: u32,
    bounds: Option<&Rect>,
) -> ScreenPoint {
    match bounds {
        Some(rect) if image_width > 0 && image_height > 0 => {
            let sx = rect.x as f64 + x / image_width as f64 * rect.width as f64;
            let sy = rect.y as f64 + y / image_height as f64 * rect.height as f64;
            ScreenPoint::new(to_pixel(sx), to_pixel(sy))
        }
        _ => ScreenPoint::new(to_pixel(x), to_pixel(y)),
    }
}

/// Anchor for a field's confirmation prompt: just below the box.
pub fn prompt_anchor(
    bbox: &BoundingBox,
    image_width: u32,
    image_height: u32,
    bounds: Option<&Rect>,
) -> ScreenPoint {
    let (cx, _) = bbox.center();
    map_point(cx, bbox.y2 + 5.0, image_width, image_height, bounds)
}

fn to_pixel(v: f64) -> i32 {
    // `as` saturates on overflow and maps NaN to 0.
    round_half_up(v) as i32
}
