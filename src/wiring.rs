//! Builds the pipeline from configuration.

use std::sync::Arc;

use tracing::info;

use formbridge_config::Config;
use formbridge_core::{Pipeline, ReplayEngine};
use formbridge_desktop::{
    EnigoInputDriver, ScreenDisplay, ScriptActivator, XcapCaptureService, XcapInventory,
};
use formbridge_extract::SubprocessExtractor;
use formbridge_overlay::{OverlayConfirmer, ProcessOverlayLauncher};
use formbridge_protocols::{Confirmer, WindowActivator};

pub(crate) fn build_extractor(config: &Config) -> SubprocessExtractor {
    let extraction = &config.extraction;
    let mut extractor = SubprocessExtractor::new(&extraction.program, extraction.args.clone());
    if let Some(ref dir) = extraction.working_dir {
        extractor = extractor.with_working_dir(dir.clone());
    }
    if let Some(timeout) = extraction.timeout() {
        extractor = extractor.with_timeout(timeout);
    }
    extractor
}

/// `None` when no overlay program is configured.
pub(crate) fn build_confirmer(config: &Config) -> Option<Arc<dyn Confirmer>> {
    let confirmation = &config.confirmation;
    let program = confirmation.overlay_program.as_ref()?;
    let launcher = ProcessOverlayLauncher::new(program, confirmation.overlay_args.clone())
        .with_close_grace(confirmation.close_grace());
    Some(Arc::new(OverlayConfirmer::new(
        Arc::new(launcher),
        Arc::new(ScreenDisplay::new()),
        confirmation.timeout(),
    )))
}

pub(crate) fn build_pipeline(config: &Config) -> Arc<Pipeline> {
    let inventory = Arc::new(XcapInventory::new(&config.host.app_name));
    let capture = Arc::new(XcapCaptureService::new(
        config.capture.width,
        config.capture.height,
    ));
    let activator: Arc<dyn WindowActivator> = Arc::new(ScriptActivator::new());

    let mut engine = ReplayEngine::new(
        inventory.clone(),
        activator.clone(),
        Arc::new(EnigoInputDriver::new()),
        config.replay.clone(),
    );
    match build_confirmer(config) {
        Some(confirmer) => {
            info!("Field confirmation overlay enabled");
            engine = engine.with_confirmer(confirmer);
        }
        None => info!("No confirmation overlay configured"),
    }

    let mut pipeline = Pipeline::new(
        inventory,
        capture,
        Arc::new(build_extractor(config)),
        Arc::new(engine),
    );
    if let Some(title) = config.host.refocus_target() {
        pipeline = pipeline.with_refocus(activator, title);
    }
    Arc::new(pipeline)
}
