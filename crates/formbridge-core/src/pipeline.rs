//! Capture -> extract -> replay.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use formbridge_protocols::{
    AutomationRequest, CaptureResult, CaptureService, DirectAction, ExtractionResult, Extractor,
    PipelineError, Rect, ReplayReport, WindowActivator, WindowHandle, WindowInventory,
};

use crate::replay::ReplayEngine;

/// Result of a full capture-extract-replay run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub extraction: ExtractionResult,
    pub bounds: Option<Rect>,
    pub image_width: u32,
    pub image_height: u32,
    pub replay: ReplayReport,
}

/// Wires the components together, leaf to root.
pub struct Pipeline {
    inventory: Arc<dyn WindowInventory>,
    capture: Arc<dyn CaptureService>,
    extractor: Arc<dyn Extractor>,
    engine: Arc<ReplayEngine>,
    refocus: Option<(Arc<dyn WindowActivator>, String)>,
}

impl Pipeline {
    pub fn new(
        inventory: Arc<dyn WindowInventory>,
        capture: Arc<dyn CaptureService>,
        extractor: Arc<dyn Extractor>,
        engine: Arc<ReplayEngine>,
    ) -> Self {
        Self {
            inventory,
            capture,
            extractor,
            engine,
            refocus: None,
        }
    }

    /// Return focus after each capture; capture tooling may steal it.
    ///
    /// The window in front before the capture is re-activated, or `title`
    /// when that cannot be determined.
    pub fn with_refocus(mut self, activator: Arc<dyn WindowActivator>, title: impl Into<String>) -> Self {
        self.refocus = Some((activator, title.into()));
        self
    }

    pub fn engine(&self) -> &Arc<ReplayEngine> {
        &self.engine
    }

    pub async fn list_windows(&self) -> Result<Vec<WindowHandle>, PipelineError> {
        let inventory = self.inventory.clone();
        let windows = tokio::task::spawn_blocking(move || inventory.list_windows())
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))??;
        Ok(windows)
    }

    pub async fn capture(&self, id: &str) -> Result<CaptureResult, PipelineError> {
        let previous = match self.refocus {
            Some((ref activator, _)) => match activator.frontmost().await {
                Ok(title) => title,
                Err(e) => {
                    debug!("Could not read the frontmost window: {}", e);
                    None
                }
            },
            None => None,
        };

        let capture = self.capture.clone();
        let owned = id.to_string();
        let result = tokio::task::spawn_blocking(move || capture.capture(&owned))
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))??;

        if let Some((ref activator, ref host)) = self.refocus {
            let title = previous.as_deref().unwrap_or(host);
            if let Err(e) = activator.activate(title).await {
                warn!("Failed to refocus {:?} after capture: {}", title, e);
            }
        }
        Ok(result)
    }

    pub async fn extract(
        &self,
        image: &[u8],
        context: &serde_json::Value,
    ) -> Result<ExtractionResult, PipelineError> {
        Ok(self.extractor.extract(image, context).await?)
    }

    pub async fn replay(&self, request: AutomationRequest) -> Result<ReplayReport, PipelineError> {
        self.engine.replay(request).await
    }

    pub async fn replay_actions(
        &self,
        window_id: &str,
        actions: Vec<DirectAction>,
    ) -> Result<ReplayReport, PipelineError> {
        self.engine.replay_actions(window_id, actions).await
    }

    /// Capture `source_id`, extract with `context`, replay the result.
    ///
    /// Capture and extraction errors abort the run before any input is sent.
    pub async fn run(
        &self,
        source_id: &str,
        context: &serde_json::Value,
        confirm: Option<bool>,
    ) -> Result<RunReport, PipelineError> {
        info!("Pipeline run for window {}", source_id);
        let capture = self.capture(source_id).await?;
        let extraction = self.extract(&capture.image_data, context).await?;

        let request = AutomationRequest {
            mapping: extraction.mapping.clone(),
            bbox_dict: extraction.bbox_dict.clone(),
            source_id: source_id.to_string(),
            bounds: capture.bounds,
            image_width: capture.image_width,
            image_height: capture.image_height,
            confirm,
        };
        let replay = self.replay(request).await?;

        Ok(RunReport {
            extraction,
            bounds: capture.bounds,
            image_width: capture.image_width,
            image_height: capture.image_height,
            replay,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
