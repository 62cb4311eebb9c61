use super::*;
use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex as SyncMutex;
use serde_json::json;

use formbridge_protocols::{ConfirmError, FieldMapping, Rect, WindowHandle};

use crate::testing::{Event, FakeActivator, FakeDriver, FakeInventory, Journal, engine_with, fast_config};

struct FakeConfirmer {
    journal: Journal,
    answers: SyncMutex<VecDeque<Result<ConfirmChoice, ConfirmError>>>,
}

#[async_trait]
impl Confirmer for FakeConfirmer {
    async fn confirm(&self, prompt: FieldPrompt) -> Result<ConfirmChoice, ConfirmError> {
        self.journal
            .lock()
            .push(Event::Confirm(prompt.field_id.clone(), prompt.x, prompt.y));
        self.answers
            .lock()
            .pop_front()
            .unwrap_or(Err(ConfirmError::SurfaceClosed))
    }
}

fn object(value: serde_json::Value) -> FieldMapping {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn request(mapping: serde_json::Value, bbox_dict: serde_json::Value) -> AutomationRequest {
    AutomationRequest {
        mapping: object(mapping),
        bbox_dict: object(bbox_dict),
        source_id: "7".to_string(),
        bounds: None,
        image_width: 1920,
        image_height: 1080,
        confirm: None,
    }
}

#[tokio::test]
async fn test_empty_mapping_activates_only() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let report = engine
        .replay(request(json!({}), json!({"name": [0, 0, 10, 10]})))
        .await
        .unwrap();

    assert_eq!(report.activation, ActivationOutcome::Activated);
    assert!(report.typed.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(
        *journal.lock(),
        vec![
            Event::Frontmost,
            Event::Activate("Patient Intake".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_fields_replayed_in_mapping_order() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let report = engine
        .replay(request(
            json!({"zip": "02139", "name": "Ada", "age": 36}),
            json!({
                "name": [100, 200, 300, 400],
                "age": [0, 0, 10, 10],
                "zip": [10, 10, 20, 30]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["zip", "name", "age"]);
    assert_eq!(
        *journal.lock(),
        vec![
            Event::Frontmost,
            Event::Activate("Patient Intake".to_string()),
            Event::Move(15, 20),
            Event::Click,
            Event::Type("02139".to_string()),
            Event::Move(200, 300),
            Event::Click,
            Event::Type("Ada".to_string()),
            Event::Move(5, 5),
            Event::Click,
            Event::Type("36".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_bounds_rescale_coordinates() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let mut req = request(json!({"name": "Ada"}), json!({"name": [100, 200, 300, 400]}));
    req.bounds = Some(Rect::new(100, 50, 960, 540));
    engine.replay(req).await.unwrap();

    assert!(journal.lock().contains(&Event::Move(200, 200)));
}

#[tokio::test]
async fn test_malformed_boxes_skipped_and_replay_continues() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let report = engine
        .replay(request(
            json!({"three": "a", "five": "b", "good": "c", "text": "d"}),
            json!({
                "three": [1, 2, 3],
                "five": [1, 2, 3, 4, 5],
                "good": [0, 0, 2, 2],
                "text": "0,0,2,2"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["good"]);
    let reasons: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.field_id.as_str(), s.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("three", SkipReason::MalformedBox),
            ("five", SkipReason::MalformedBox),
            ("text", SkipReason::MalformedBox),
        ]
    );
    let types = journal
        .lock()
        .iter()
        .filter(|e| matches!(e, Event::Type(_)))
        .count();
    assert_eq!(types, 1);
}

#[tokio::test]
async fn test_unmatched_keys_ignored() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let report = engine
        .replay(request(
            json!({"name": "Ada", "email": "ada@example.com"}),
            json!({"name": [0, 0, 10, 10], "phone": [5, 5, 6, 6]}),
        ))
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["name"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].field_id, "email");
    assert_eq!(report.skipped[0].reason, SkipReason::MissingBox);
}

#[tokio::test]
async fn test_input_failure_skips_field() {
    let journal = Journal::default();
    let engine = engine_with(&journal, Some(("bad".to_string(), false)));

    let report = engine
        .replay(request(
            json!({"a": "bad", "b": "good"}),
            json!({"a": [0, 0, 2, 2], "b": [2, 2, 4, 4]}),
        ))
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["b"]);
    assert_eq!(report.skipped[0].reason, SkipReason::InputFailed);
}

#[tokio::test]
async fn test_unavailable_device_aborts() {
    let journal = Journal::default();
    let engine = engine_with(&journal, Some(("bad".to_string(), true)));

    let err = engine
        .replay(request(
            json!({"a": "bad", "b": "good"}),
            json!({"a": [0, 0, 2, 2], "b": [2, 2, 4, 4]}),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Input(InputError::Unavailable(_))));
    assert!(!journal.lock().contains(&Event::Type("good".to_string())));
}

#[tokio::test]
async fn test_unknown_source_still_replays() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let mut req = request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]}));
    req.source_id = "404".to_string();
    let report = engine.replay(req).await.unwrap();

    assert_eq!(report.activation, ActivationOutcome::SourceNotFound);
    assert_eq!(report.typed, vec!["a"]);
    assert!(
        !journal
            .lock()
            .iter()
            .any(|e| matches!(e, Event::Activate(_)))
    );
}

#[tokio::test]
async fn test_activation_failure_is_not_fatal() {
    let journal = Journal::default();
    let engine = ReplayEngine::new(
        Arc::new(FakeInventory(vec![WindowHandle::new("7", "Patient Intake")])),
        Arc::new(FakeActivator::new(&journal, Err("permission denied".to_string()))),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text: None,
        }),
        fast_config(),
    );

    let report = engine
        .replay(request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]})))
        .await
        .unwrap();

    assert!(matches!(report.activation, ActivationOutcome::Failed(ref m) if m.contains("permission denied")));
    assert_eq!(report.typed, vec!["a"]);
}

#[tokio::test]
async fn test_unsupported_activation_reported() {
    let journal = Journal::default();
    let engine = ReplayEngine::new(
        Arc::new(FakeInventory(vec![WindowHandle::new("7", "Patient Intake")])),
        Arc::new(FakeActivator::new(&journal, Ok(ActivationOutcome::Unsupported))),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text: None,
        }),
        fast_config(),
    );

    let report = engine
        .replay(request(json!({}), json!({})))
        .await
        .unwrap();
    assert_eq!(report.activation, ActivationOutcome::Unsupported);
}

#[tokio::test]
async fn test_confirmation_reject_skips_field() {
    let journal = Journal::default();
    let confirmer = Arc::new(FakeConfirmer {
        journal: journal.clone(),
        answers: SyncMutex::new(VecDeque::from(vec![
            Ok(ConfirmChoice::Reject),
            Ok(ConfirmChoice::Accept),
            Err(ConfirmError::Timeout(60)),
        ])),
    });
    let engine = engine_with(&journal, None).with_confirmer(confirmer);

    let mut req = request(
        json!({"a": "one", "b": "two", "c": "three"}),
        json!({"a": [100, 200, 300, 400], "b": [0, 0, 10, 10], "c": [0, 0, 4, 4]}),
    );
    req.confirm = Some(true);
    let report = engine.replay(req).await.unwrap();

    assert_eq!(report.typed, vec!["b"]);
    assert_eq!(report.skipped[0].reason, SkipReason::Rejected);
    assert_eq!(report.skipped[1].reason, SkipReason::ConfirmationFailed);

    let journal = journal.lock();
    // Prompt for "a" sits 5px below the box, at the center column.
    assert!(journal.contains(&Event::Confirm("a".to_string(), 200, 405)));
    assert!(!journal.contains(&Event::Type("one".to_string())));
    assert!(journal.contains(&Event::Type("two".to_string())));
    assert!(!journal.contains(&Event::Type("three".to_string())));
}

#[tokio::test]
async fn test_confirmation_without_overlay_skips_fields() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let mut req = request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]}));
    req.confirm = Some(true);
    let report = engine.replay(req).await.unwrap();

    assert!(report.typed.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::ConfirmationFailed);
}

#[tokio::test]
async fn test_confirm_override_disables_configured_default() {
    let journal = Journal::default();
    let mut config = fast_config();
    config.confirm_fields = true;
    let engine = ReplayEngine::new(
        Arc::new(FakeInventory(vec![WindowHandle::new("7", "Patient Intake")])),
        Arc::new(FakeActivator::new(&journal, Ok(ActivationOutcome::Activated))),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text: None,
        }),
        config,
    );

    let mut req = request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]}));
    req.confirm = Some(false);
    let report = engine.replay(req).await.unwrap();
    assert_eq!(report.typed, vec!["a"]);
}

#[tokio::test]
async fn test_replay_actions() {
    let journal = Journal::default();
    let engine = engine_with(&journal, None);

    let report = engine
        .replay_actions(
            "8",
            vec![
                DirectAction {
                    x: 10,
                    y: 20,
                    text: "hello".to_string(),
                },
                DirectAction {
                    x: 30,
                    y: 40,
                    text: String::new(),
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["action-0", "action-1"]);
    assert_eq!(
        *journal.lock(),
        vec![
            Event::Frontmost,
            Event::Activate("Notes".to_string()),
            Event::Move(10, 20),
            Event::Click,
            Event::Type("hello".to_string()),
            Event::Move(30, 40),
            Event::Click,
        ]
    );
}

#[tokio::test]
async fn test_concurrent_replays_do_not_interleave() {
    let journal = Journal::default();
    let mut config = fast_config();
    config.move_settle_ms = 5;
    config.click_settle_ms = 5;
    let engine = Arc::new(ReplayEngine::new(
        Arc::new(FakeInventory(vec![WindowHandle::new("7", "Patient Intake")])),
        Arc::new(FakeActivator::new(&journal, Ok(ActivationOutcome::Activated))),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text: None,
        }),
        config,
    ));

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .replay(request(
                    json!({"a1": "A1", "a2": "A2"}),
                    json!({"a1": [0, 0, 2, 2], "a2": [0, 0, 2, 2]}),
                ))
                .await
        })
    };
    let second = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .replay(request(
                    json!({"b1": "B1", "b2": "B2"}),
                    json!({"b1": [0, 0, 2, 2], "b2": [0, 0, 2, 2]}),
                ))
                .await
        })
    };
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let typed: Vec<String> = journal
        .lock()
        .iter()
        .filter_map(|e| match e {
            Event::Type(t) => Some(t.clone()),
            _ => None,
        })
        .collect();
    let joined = typed.join(",");
    assert!(joined == "A1,A2,B1,B2" || joined == "B1,B2,A1,A2", "interleaved: {}", joined);
}

fn engine_restoring(
    journal: &Journal,
    frontmost: Result<Option<String>, String>,
    fail_text: Option<(String, bool)>,
) -> ReplayEngine {
    ReplayEngine::new(
        Arc::new(FakeInventory(vec![
            WindowHandle::new("7", "Patient Intake"),
            WindowHandle::new("8", "Notes"),
        ])),
        Arc::new(
            FakeActivator::new(journal, Ok(ActivationOutcome::Activated)).with_frontmost(frontmost),
        ),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text,
        }),
        fast_config(),
    )
}

#[tokio::test]
async fn test_previous_window_restored_after_replay() {
    let journal = Journal::default();
    let engine = engine_restoring(&journal, Ok(Some("Inbox - Mail".to_string())), None);

    engine
        .replay(request(json!({"name": "Ada"}), json!({"name": [0, 0, 10, 10]})))
        .await
        .unwrap();

    assert_eq!(
        *journal.lock(),
        vec![
            Event::Frontmost,
            Event::Activate("Patient Intake".to_string()),
            Event::Move(5, 5),
            Event::Click,
            Event::Type("Ada".to_string()),
            Event::Activate("Inbox - Mail".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_no_restore_when_target_was_in_front() {
    let journal = Journal::default();
    let engine = engine_restoring(&journal, Ok(Some("Patient Intake".to_string())), None);

    engine
        .replay(request(json!({"name": "Ada"}), json!({"name": [0, 0, 10, 10]})))
        .await
        .unwrap();

    let activations = journal
        .lock()
        .iter()
        .filter(|e| matches!(e, Event::Activate(_)))
        .count();
    assert_eq!(activations, 1);
}

#[tokio::test]
async fn test_restore_disabled_skips_frontmost_query() {
    let journal = Journal::default();
    let mut config = fast_config();
    config.restore_focus = false;
    let engine = ReplayEngine::new(
        Arc::new(FakeInventory(vec![WindowHandle::new("7", "Patient Intake")])),
        Arc::new(
            FakeActivator::new(&journal, Ok(ActivationOutcome::Activated))
                .with_frontmost(Ok(Some("Inbox - Mail".to_string()))),
        ),
        Arc::new(FakeDriver {
            journal: journal.clone(),
            fail_text: None,
        }),
        config,
    );

    engine
        .replay(request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]})))
        .await
        .unwrap();

    let journal = journal.lock();
    assert!(!journal.contains(&Event::Frontmost));
    assert!(!journal.contains(&Event::Activate("Inbox - Mail".to_string())));
}

#[tokio::test]
async fn test_frontmost_failure_is_not_fatal() {
    let journal = Journal::default();
    let engine = engine_restoring(&journal, Err("xdotool: not found".to_string()), None);

    let report = engine
        .replay(request(json!({"a": "x"}), json!({"a": [0, 0, 2, 2]})))
        .await
        .unwrap();

    assert_eq!(report.typed, vec!["a"]);
    let activations = journal
        .lock()
        .iter()
        .filter(|e| matches!(e, Event::Activate(_)))
        .count();
    assert_eq!(activations, 1);
}

#[tokio::test]
async fn test_focus_restored_when_device_fails() {
    let journal = Journal::default();
    let engine = engine_restoring(
        &journal,
        Ok(Some("Inbox - Mail".to_string())),
        Some(("bad".to_string(), true)),
    );

    let result = engine
        .replay(request(json!({"a": "bad"}), json!({"a": [0, 0, 2, 2]})))
        .await;

    assert!(result.is_err());
    assert_eq!(
        journal.lock().last(),
        Some(&Event::Activate("Inbox - Mail".to_string()))
    );
}

#[tokio::test]
async fn test_previous_window_restored_after_direct_actions() {
    let journal = Journal::default();
    let engine = engine_restoring(&journal, Ok(Some("Inbox - Mail".to_string())), None);

    engine
        .replay_actions(
            "8",
            vec![DirectAction {
                x: 10,
                y: 20,
                text: "hello".to_string(),
            }],
        )
        .await
        .unwrap();

    let journal = journal.lock();
    assert_eq!(journal.first(), Some(&Event::Frontmost));
    assert_eq!(journal[1], Event::Activate("Notes".to_string()));
    assert_eq!(
        journal.last(),
        Some(&Event::Activate("Inbox - Mail".to_string()))
    );
}
