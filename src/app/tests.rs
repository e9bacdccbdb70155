use super::logging::set_logging_for_tests;
use super::{App, View};
use crate::classify::{Classify, Prediction};
use crate::config::AppConfig;
use crate::detections::Severity;
use crate::game::Marker;
use crate::session::SessionEvent;
use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct UnusedClassifier;

impl Classify for UnusedClassifier {
    fn classify(&self, _wav: Vec<u8>) -> Result<Prediction> {
        Err(anyhow!("no classification expected in this test"))
    }
}

fn test_app() -> App {
    set_logging_for_tests(false, false);
    let config = AppConfig::parse_from(["test-app"]);
    config.validate().expect("defaults should be valid");
    App::with_classifier(config, Arc::new(UnusedClassifier))
}

#[test]
fn starts_idle_on_the_capture_view() {
    let app = test_app();
    assert_eq!(app.view(), View::Capture);
    assert!(!app.listening());
    assert!(app.detections().is_empty());
    assert!(app.detection_notice().is_none());
    assert!(app.status_notice().is_none());
}

#[test]
fn key_2_appends_exactly_one_stove_on_entry() {
    let mut app = test_app();
    assert!(app.push_test_key('2'));
    assert_eq!(app.detections().len(), 1);
    let labels: Vec<_> = app.detections().iter().map(|event| event.label()).collect();
    assert_eq!(labels, vec!["Stove ON"]);

    let notice = app.detection_notice().expect("detection notice shown");
    assert_eq!(notice.severity, Severity::Info);
    assert_eq!(notice.message, "Detected: Stove ON");
    // The keystroke path bypasses the scheduler, so no upload status appears.
    assert!(app.status_notice().is_none());
}

#[test]
fn unmapped_keys_leave_the_history_alone() {
    let mut app = test_app();
    assert!(!app.push_test_key('7'));
    assert!(!app.push_test_key('x'));
    assert!(app.detections().is_empty());
}

#[test]
fn detection_events_append_and_report_success() {
    let mut app = test_app();
    app.handle_session_event(SessionEvent::Detection {
        label: "Front Door".to_string(),
    });
    assert_eq!(app.detections().len(), 1);
    let status = app.status_notice().expect("upload status shown");
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.message, "Sound detected successfully!");
}

#[test]
fn upload_failure_leaves_the_history_unchanged() {
    let mut app = test_app();
    app.push_test_key('1');
    let before = app.detections().len();

    app.handle_session_event(SessionEvent::UploadFailed {
        message: "connection refused".to_string(),
    });

    assert_eq!(app.detections().len(), before);
    let status = app.status_notice().expect("error notice shown");
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(status.message, "API request failed!");
}

#[test]
fn session_failure_reverts_to_idle() {
    let mut app = test_app();
    app.handle_session_event(SessionEvent::Failed {
        message: "permission denied".to_string(),
    });
    assert!(!app.listening());
    let status = app.status_notice().expect("error notice shown");
    assert_eq!(status.severity, Severity::Error);
}

#[test]
fn listening_event_updates_the_status_line() {
    let mut app = test_app();
    app.handle_session_event(SessionEvent::Listening {
        device: "Built-in Microphone".to_string(),
    });
    assert_eq!(app.status_text(), "Listening on Built-in Microphone.");
}

#[test]
fn notices_expire_after_their_ttl() {
    let mut app = test_app();
    app.push_test_key('3');
    app.handle_session_event(SessionEvent::UploadFailed {
        message: "boom".to_string(),
    });
    assert!(app.detection_notice().is_some());
    assert!(app.status_notice().is_some());

    app.tick(Instant::now() + Duration::from_secs(6));
    assert!(app.detection_notice().is_none());
    assert!(app.status_notice().is_none());
}

#[test]
fn tab_switches_between_the_two_views() {
    let mut app = test_app();
    app.switch_view();
    assert_eq!(app.view(), View::Board);
    app.switch_view();
    assert_eq!(app.view(), View::Capture);
}

#[test]
fn cursor_stays_on_the_board() {
    let mut app = test_app();
    app.move_cursor(-1, -1);
    assert_eq!(app.cursor(), 0);
    app.move_cursor(2, 2);
    assert_eq!(app.cursor(), 8);
    app.move_cursor(1, 1);
    assert_eq!(app.cursor(), 8);
}

#[test]
fn playing_alternates_turns_and_rejects_occupied_cells() {
    let mut app = test_app();
    assert_eq!(app.turn(), Marker::X);
    app.play_cursor();
    assert_eq!(app.board().cell(0), Some(Marker::X));
    assert_eq!(app.turn(), Marker::O);

    // Same cell again: silent no-op, turn unchanged.
    app.play_cursor();
    assert_eq!(app.board().cell(0), Some(Marker::X));
    assert_eq!(app.turn(), Marker::O);

    app.move_cursor(1, 0);
    app.play_cursor();
    assert_eq!(app.board().cell(3), Some(Marker::O));
    assert_eq!(app.turn(), Marker::X);
}

#[test]
fn new_game_resets_the_board_and_turn() {
    let mut app = test_app();
    app.play_cursor();
    app.move_cursor(0, 1);
    app.play_cursor();
    app.new_game();
    assert_eq!(app.turn(), Marker::X);
    assert_eq!(app.cursor(), 0);
    assert!(app.board().is_vacant(0));
    assert_eq!(app.board_status(), "Next player: X");
}
