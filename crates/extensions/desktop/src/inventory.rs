//! Window inventory backed by xcap.

use tracing::debug;
use xcap::Window;

use formbridge_protocols::{CaptureError, WindowHandle, WindowInventory};

/// Lists capturable windows, skipping untitled ones and the host itself.
#[derive(Debug, Clone)]
pub struct XcapInventory {
    app_name: String,
}

impl XcapInventory {
    /// `app_name` is the host application's own window title.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl WindowInventory for XcapInventory {
    fn list_windows(&self) -> Result<Vec<WindowHandle>, CaptureError> {
        let windows = Window::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let handles = filter_windows(
            windows.iter().map(|w| (w.id().to_string(), w.title().to_string())),
            &self.app_name,
        );
        debug!("Inventory: {} capturable windows", handles.len());
        Ok(handles)
    }
}

/// Keep OS order; drop untitled entries and the host window.
pub(crate) fn filter_windows<I>(windows: I, app_name: &str) -> Vec<WindowHandle>
where
    I: IntoIterator<Item = (String, String)>,
{
    let host = app_name.trim();
    windows
        .into_iter()
        .filter(|(_, title)| {
            let title = title.trim();
            !title.is_empty() && title != host
        })
        .map(|(id, title)| WindowHandle::new(id, title))
        .collect()
}
