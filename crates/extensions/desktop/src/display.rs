//! Primary display lookup.

use screenshots::Screen;

use formbridge_protocols::{CaptureError, DisplayInfo, Rect};

/// [`DisplayInfo`] backed by the `screenshots` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenDisplay;

impl ScreenDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayInfo for ScreenDisplay {
    fn primary_display(&self) -> Result<Rect, CaptureError> {
        let screens = Screen::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let displays = screens.iter().map(|s| {
            let info = &s.display_info;
            (
                info.is_primary,
                Rect::new(info.x, info.y, info.width, info.height),
            )
        });
        pick_primary(displays).ok_or(CaptureError::NoMonitor)
    }
}

/// The display flagged primary, else the first one.
fn pick_primary<I>(displays: I) -> Option<Rect>
where
    I: IntoIterator<Item = (bool, Rect)>,
{
    let mut first = None;
    for (is_primary, rect) in displays {
        if is_primary {
            return Some(rect);
        }
        first.get_or_insert(rect);
    }
    first
}
