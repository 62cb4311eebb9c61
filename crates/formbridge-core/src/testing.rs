//! Recording fakes for the pipeline seams.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use formbridge_config::ReplayConfig;
use formbridge_protocols::{
    ActivationError, ActivationOutcome, CaptureError, InputDriver, InputError, WindowActivator,
    WindowHandle, WindowInventory,
};

use crate::replay::ReplayEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Activate(String),
    Move(i32, i32),
    Click,
    Type(String),
    Confirm(String, i32, i32),
    Frontmost,
}

pub(crate) type Journal = Arc<Mutex<Vec<Event>>>;

pub(crate) struct FakeInventory(pub Vec<WindowHandle>);

impl WindowInventory for FakeInventory {
    fn list_windows(&self) -> Result<Vec<WindowHandle>, CaptureError> {
        Ok(self.0.clone())
    }
}

pub(crate) struct FakeActivator {
    pub journal: Journal,
    pub outcome: Result<ActivationOutcome, String>,
    /// Reported by `frontmost`; `Err` makes the query fail.
    pub frontmost: Result<Option<String>, String>,
}

impl FakeActivator {
    pub fn new(journal: &Journal, outcome: Result<ActivationOutcome, String>) -> Self {
        Self {
            journal: journal.clone(),
            outcome,
            frontmost: Ok(None),
        }
    }

    pub fn with_frontmost(mut self, frontmost: Result<Option<String>, String>) -> Self {
        self.frontmost = frontmost;
        self
    }
}

#[async_trait]
impl WindowActivator for FakeActivator {
    async fn activate(&self, title: &str) -> Result<ActivationOutcome, ActivationError> {
        self.journal.lock().push(Event::Activate(title.to_string()));
        self.outcome
            .clone()
            .map_err(ActivationError::NotActivated)
    }

    async fn frontmost(&self) -> Result<Option<String>, ActivationError> {
        self.journal.lock().push(Event::Frontmost);
        self.frontmost
            .clone()
            .map_err(ActivationError::CommandFailed)
    }
}

/// Records every event; optionally fails on a given typed text.
pub(crate) struct FakeDriver {
    pub journal: Journal,
    pub fail_text: Option<(String, bool)>,
}

#[async_trait]
impl InputDriver for FakeDriver {
    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), InputError> {
        self.journal.lock().push(Event::Move(x, y));
        Ok(())
    }

    async fn click(&self) -> Result<(), InputError> {
        self.journal.lock().push(Event::Click);
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), InputError> {
        if let Some((ref bad, fatal)) = self.fail_text {
            if bad == text {
                return Err(if fatal {
                    InputError::Unavailable("no display".to_string())
                } else {
                    InputError::Failed("keystroke dropped".to_string())
                });
            }
        }
        self.journal.lock().push(Event::Type(text.to_string()));
        Ok(())
    }
}

pub(crate) fn fast_config() -> ReplayConfig {
    ReplayConfig {
        activation_settle_ms: 0,
        move_settle_ms: 0,
        click_settle_ms: 0,
        field_delay_ms: 0,
        confirm_fields: false,
        restore_focus: true,
    }
}

pub(crate) fn engine_with(journal: &Journal, fail_text: Option<(String, bool)>) -> ReplayEngine {
    ReplayEngine::new(
        Arc::new(FakeInventory(vec![
            WindowHandle::new("7", "Patient Intake"),
            WindowHandle::new("8", "Notes"),
        ])),
        Arc::new(FakeActivator::new(journal, Ok(ActivationOutcome::Activated))),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text,
        }),
        fast_config(),
    )
}

