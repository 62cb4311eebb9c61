//! Input replay engine.
//!
//! Drives the synthetic pointer and keyboard to type a field mapping into
//! the target window: activate, settle, then for each field move, click,
//! type. Best effort: a bad field is recorded and skipped. The window that
//! was in front beforehand is re-activated afterwards.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{Instrument, debug, info, warn};

use formbridge_config::ReplayConfig;
use formbridge_protocols::{
    ActivationOutcome, AutomationRequest, BoundingBox, ConfirmChoice, Confirmer, DirectAction,
    FieldPrompt, InputDriver, InputError, PipelineError, ReplayReport, ScreenPoint, SkipReason,
    WindowActivator, WindowInventory, value_text,
};

use crate::context::RequestContext;
use crate::mapper::{map_to_screen, prompt_anchor};

/// Replays automation requests, one at a time.
pub struct ReplayEngine {
    inventory: Arc<dyn WindowInventory>,
    activator: Arc<dyn WindowActivator>,
    driver: Arc<dyn InputDriver>,
    confirmer: Option<Arc<dyn Confirmer>>,
    config: ReplayConfig,
    /// The input device is shared by the whole desktop session.
    device: Mutex<()>,
}

/// Whether a field-level input failure can be skipped.
enum InputFailure {
    Skip(InputError),
    Abort(InputError),
}

impl From<InputError> for InputFailure {
    fn from(e: InputError) -> Self {
        match e {
            InputError::Unavailable(_) => InputFailure::Abort(e),
            InputError::Failed(_) => InputFailure::Skip(e),
        }
    }
}

impl ReplayEngine {
    pub fn new(
        inventory: Arc<dyn WindowInventory>,
        activator: Arc<dyn WindowActivator>,
        driver: Arc<dyn InputDriver>,
        config: ReplayConfig,
    ) -> Self {
        Self {
            inventory,
            activator,
            driver,
            confirmer: None,
            config,
            device: Mutex::new(()),
        }
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = Some(confirmer);
        self
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Replay `request` into its source window.
    ///
    /// Errors only when the input device itself is unusable; everything
    /// field-level ends up in the report.
    pub async fn replay(&self, request: AutomationRequest) -> Result<ReplayReport, PipelineError> {
        let confirm = request.confirm.unwrap_or(self.config.confirm_fields);
        let ctx = RequestContext::new(request.source_id.clone(), confirm);
        let span = ctx.span();
        self.replay_fields(ctx, request).instrument(span).await
    }

    /// Click (and type, when `text` is non-empty) at pre-computed screen
    /// positions in `window_id`.
    pub async fn replay_actions(
        &self,
        window_id: &str,
        actions: Vec<DirectAction>,
    ) -> Result<ReplayReport, PipelineError> {
        let ctx = RequestContext::new(window_id, false);
        let span = ctx.span();
        self.replay_direct(ctx, actions).instrument(span).await
    }

    async fn replay_fields(
        &self,
        ctx: RequestContext,
        request: AutomationRequest,
    ) -> Result<ReplayReport, PipelineError> {
        let _device = self.acquire_device().await;
        info!(
            "Replaying {} fields (confirm: {})",
            request.mapping.len(),
            ctx.confirm_fields
        );

        let previous = self.remember_focus().await;
        let target = self.resolve_title(&ctx.source_id).await;
        let activation = self.activate(&target).await;
        let result = self.type_fields(&ctx, activation, request).await;
        self.restore_focus(previous, target.ok().as_deref()).await;
        result
    }

    async fn type_fields(
        &self,
        ctx: &RequestContext,
        activation: ActivationOutcome,
        request: AutomationRequest,
    ) -> Result<ReplayReport, PipelineError> {
        let mut report = ReplayReport::new(ctx.request_id, activation);
        sleep(self.config.activation_settle()).await;

        let bounds = request.bounds.as_ref();
        if bounds.is_none() && !request.mapping.is_empty() {
            warn!("No window bounds; using raw image coordinates");
        }

        for (field_id, value) in &request.mapping {
            let Some(raw) = request.bbox_dict.get(field_id) else {
                debug!("No bounding box for field {}", field_id);
                report.skip(field_id, SkipReason::MissingBox, "no bounding box");
                continue;
            };
            let bbox = match BoundingBox::from_value(field_id, raw) {
                Ok(bbox) => bbox,
                Err(e) => {
                    warn!("{}", e);
                    report.skip(field_id, SkipReason::MalformedBox, e.reason);
                    continue;
                }
            };

            let point = map_to_screen(&bbox, request.image_width, request.image_height, bounds);
            let text = value_text(value);

            if ctx.confirm_fields {
                let anchor =
                    prompt_anchor(&bbox, request.image_width, request.image_height, bounds);
                if let Err((reason, detail)) = self.confirm_field(field_id, anchor, &text).await {
                    report.skip(field_id, reason, detail);
                    continue;
                }
            }

            match self.type_at(point, &text).await {
                Ok(()) => {
                    debug!("Typed field {} at ({}, {})", field_id, point.x, point.y);
                    report.typed.push(field_id.clone());
                }
                Err(InputFailure::Skip(e)) => {
                    warn!("Input failed for field {}: {}", field_id, e);
                    report.skip(field_id, SkipReason::InputFailed, e.to_string());
                }
                Err(InputFailure::Abort(e)) => return Err(e.into()),
            }
            sleep(self.config.field_delay()).await;
        }

        info!(
            "Replay finished in {}ms: {} typed, {} skipped",
            ctx.elapsed_ms(),
            report.typed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn replay_direct(
        &self,
        ctx: RequestContext,
        actions: Vec<DirectAction>,
    ) -> Result<ReplayReport, PipelineError> {
        let _device = self.acquire_device().await;
        info!("Replaying {} direct actions", actions.len());

        let previous = self.remember_focus().await;
        let target = self.resolve_title(&ctx.source_id).await;
        let activation = self.activate(&target).await;
        let result = self.run_actions(&ctx, activation, actions).await;
        self.restore_focus(previous, target.ok().as_deref()).await;
        result
    }

    async fn run_actions(
        &self,
        ctx: &RequestContext,
        activation: ActivationOutcome,
        actions: Vec<DirectAction>,
    ) -> Result<ReplayReport, PipelineError> {
        let mut report = ReplayReport::new(ctx.request_id, activation);
        sleep(self.config.activation_settle()).await;

        for (index, action) in actions.iter().enumerate() {
            let label = format!("action-{}", index);
            match self
                .type_at(ScreenPoint::new(action.x, action.y), &action.text)
                .await
            {
                Ok(()) => report.typed.push(label),
                Err(InputFailure::Skip(e)) => {
                    warn!("Input failed for {}: {}", label, e);
                    report.skip(&label, SkipReason::InputFailed, e.to_string());
                }
                Err(InputFailure::Abort(e)) => return Err(e.into()),
            }
            sleep(self.config.field_delay()).await;
        }

        info!(
            "Direct replay finished in {}ms: {} done, {} skipped",
            ctx.elapsed_ms(),
            report.typed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn acquire_device(&self) -> tokio::sync::MutexGuard<'_, ()> {
        if let Ok(guard) = self.device.try_lock() {
            return guard;
        }
        info!("Another replay is running; waiting for the input device");
        self.device.lock().await
    }

    /// Window title for `source_id`, or the outcome to report when it has none.
    async fn resolve_title(&self, source_id: &str) -> Result<String, ActivationOutcome> {
        let inventory = self.inventory.clone();
        let windows = match tokio::task::spawn_blocking(move || inventory.list_windows()).await {
            Ok(Ok(windows)) => windows,
            Ok(Err(e)) => {
                warn!("Window lookup failed, skipping activation: {}", e);
                return Err(ActivationOutcome::Failed(e.to_string()));
            }
            Err(e) => {
                warn!("Window lookup task failed, skipping activation: {}", e);
                return Err(ActivationOutcome::Failed(e.to_string()));
            }
        };

        match windows.into_iter().find(|w| w.id == source_id) {
            Some(handle) => Ok(handle.name),
            None => {
                warn!("Source {} not found, skipping activation", source_id);
                Err(ActivationOutcome::SourceNotFound)
            }
        }
    }

    /// Bring the source window forward. Never fails the replay.
    async fn activate(&self, target: &Result<String, ActivationOutcome>) -> ActivationOutcome {
        let title = match target {
            Ok(title) => title,
            Err(outcome) => return outcome.clone(),
        };

        match self.activator.activate(title).await {
            Ok(ActivationOutcome::Unsupported) => {
                warn!("Window activation is not supported on this platform");
                ActivationOutcome::Unsupported
            }
            Ok(outcome) => {
                debug!("Activated {:?}", title);
                outcome
            }
            Err(e) => {
                warn!("Failed to activate {:?}: {}", title, e);
                ActivationOutcome::Failed(e.to_string())
            }
        }
    }

    /// Title of the window in front before the replay, when restoring is on.
    async fn remember_focus(&self) -> Option<String> {
        if !self.config.restore_focus {
            return None;
        }
        match self.activator.frontmost().await {
            Ok(title) => title,
            Err(e) => {
                warn!("Could not read the frontmost window: {}", e);
                None
            }
        }
    }

    /// Re-activate `previous` unless it is the window that was just typed into.
    async fn restore_focus(&self, previous: Option<String>, target: Option<&str>) {
        let Some(previous) = previous else {
            return;
        };
        if target == Some(previous.as_str()) {
            debug!("{:?} was already in front, nothing to restore", previous);
            return;
        }
        match self.activator.activate(&previous).await {
            Ok(ActivationOutcome::Activated) => debug!("Restored focus to {:?}", previous),
            Ok(outcome) => warn!("Focus not restored to {:?}: {:?}", previous, outcome),
            Err(e) => warn!("Failed to restore focus to {:?}: {}", previous, e),
        }
    }

    async fn confirm_field(
        &self,
        field_id: &str,
        anchor: ScreenPoint,
        text: &str,
    ) -> Result<(), (SkipReason, String)> {
        let Some(ref confirmer) = self.confirmer else {
            warn!("Confirmation requested but no overlay is configured; skipping {}", field_id);
            return Err((
                SkipReason::ConfirmationFailed,
                "no confirmation overlay configured".to_string(),
            ));
        };

        let prompt = FieldPrompt {
            field_id: field_id.to_string(),
            x: anchor.x,
            y: anchor.y,
            text: text.to_string(),
        };
        match confirmer.confirm(prompt).await {
            Ok(ConfirmChoice::Accept) => Ok(()),
            Ok(ConfirmChoice::Reject) => {
                info!("Field {} rejected", field_id);
                Err((SkipReason::Rejected, "rejected by user".to_string()))
            }
            Err(e) => {
                warn!("Confirmation for field {} failed: {}", field_id, e);
                Err((SkipReason::ConfirmationFailed, e.to_string()))
            }
        }
    }

    /// move, settle, click, settle, type.
    async fn type_at(&self, point: ScreenPoint, text: &str) -> Result<(), InputFailure> {
        self.driver.move_pointer(point.x, point.y).await?;
        sleep(self.config.move_settle()).await;
        self.driver.click().await?;
        sleep(self.config.click_settle()).await;
        if !text.is_empty() {
            self.driver.type_text(text).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
