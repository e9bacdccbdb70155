use crate::audio::{LiveMeter, Recorder, METER_FLOOR_DB};
use crate::classify::{Classify, HttpClassifier};
use crate::config::AppConfig;
use crate::detections::{test_label_for_key, DetectionLog, Notice};
use crate::game::{apply_move, next_turn, status_line, Board, Marker};
use crate::session::{RecordingSession, SessionEvent};
use crate::{log_debug, log_debug_content};
use anyhow::Result;
use crossbeam_channel::TryRecvError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a "Detected: ..." notice stays on screen.
const DETECTION_NOTICE_TTL: Duration = Duration::from_secs(5);
/// How long an upload status notice stays on screen.
const STATUS_NOTICE_TTL: Duration = Duration::from_secs(3);

const IDLE_STATUS: &str = "Sound detection off. Press Space to start listening.";

/// The two addressable views. No state is shared between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Capture,
    Board,
}

struct TimedNotice {
    notice: Notice,
    expires_at: Instant,
}

/// Central application state shared between the event loop, the renderer,
/// and the session worker's event channel.
pub struct App {
    config: AppConfig,
    classifier: Arc<dyn Classify>,
    recorder: Option<Arc<Mutex<Recorder>>>,
    session: Option<RecordingSession>,
    meter: LiveMeter,
    detections: DetectionLog,
    detection_notice: Option<TimedNotice>,
    status_notice: Option<TimedNotice>,
    status: String,
    view: View,
    board: Board,
    turn: Marker,
    cursor: usize,
    needs_redraw: bool,
}

impl App {
    /// Create the application state with the HTTP classifier from the
    /// configured endpoint.
    pub fn new(config: AppConfig) -> Result<Self> {
        let classifier: Arc<dyn Classify> = Arc::new(HttpClassifier::new(
            &config.endpoint,
            Duration::from_millis(config.upload_timeout_ms),
        )?);
        Ok(Self::with_classifier(config, classifier))
    }

    /// Constructor seam for tests: inject any classifier.
    pub fn with_classifier(config: AppConfig, classifier: Arc<dyn Classify>) -> Self {
        Self {
            config,
            classifier,
            recorder: None,
            session: None,
            meter: LiveMeter::new(),
            detections: DetectionLog::new(),
            detection_notice: None,
            status_notice: None,
            status: IDLE_STATUS.to_string(),
            view: View::Capture,
            board: Board::new(),
            turn: Marker::X,
            cursor: 0,
            needs_redraw: true,
        }
    }

    /// Create the audio recorder on first use so we only query the OS once.
    fn get_recorder(&mut self) -> Result<Arc<Mutex<Recorder>>> {
        if self.recorder.is_none() {
            let recorder = Recorder::new(self.config.input_device.as_deref())?;
            self.recorder = Some(Arc::new(Mutex::new(recorder)));
        }
        Ok(self
            .recorder
            .as_ref()
            .expect("recorder initialized")
            .clone())
    }

    pub fn listening(&self) -> bool {
        self.session.is_some()
    }

    /// Flip the capture toggle: off when listening, on when idle.
    pub fn toggle_listening(&mut self) {
        if self.session.is_some() {
            self.stop_listening();
        } else {
            self.start_listening();
        }
    }

    fn start_listening(&mut self) {
        let recorder = match self.get_recorder() {
            Ok(recorder) => recorder,
            Err(err) => {
                log_debug(&format!("microphone unavailable: {err:#}"));
                self.show_status_notice(Notice::error("Microphone unavailable (see log)"));
                self.status = IDLE_STATUS.to_string();
                self.request_redraw();
                return;
            }
        };
        let session = RecordingSession::start(
            recorder,
            self.classifier.clone(),
            self.config.session_config(),
            self.meter.clone(),
        );
        self.session = Some(session);
        self.status = "Starting microphone...".to_string();
        self.request_redraw();
    }

    /// Idempotent teardown of the active session: releases the microphone
    /// and clears the flush ticker. Safe to call when already idle.
    pub fn stop_listening(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        self.meter.set_db(METER_FLOOR_DB);
        self.status = IDLE_STATUS.to_string();
        self.request_redraw();
    }

    /// Drain pending session events without blocking the UI thread.
    pub fn poll_session(&mut self) {
        let mut events = Vec::new();
        let mut disconnected = false;
        if let Some(session) = self.session.as_ref() {
            loop {
                match session.try_event() {
                    Ok(event) => events.push(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        for event in events {
            self.handle_session_event(event);
        }
        if disconnected && self.session.is_some() {
            log_debug("capture worker disconnected unexpectedly");
            self.stop_listening();
            self.show_status_notice(Notice::error("Capture stopped unexpectedly"));
        }
    }

    pub(crate) fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Listening { device } => {
                self.status = format!("Listening on {device}.");
            }
            SessionEvent::Detection { label } => {
                self.record_detection(label);
                self.show_status_notice(Notice::success("Sound detected successfully!"));
            }
            SessionEvent::UploadFailed { message } => {
                log_debug(&format!("upload failed: {message}"));
                self.show_status_notice(Notice::error("API request failed!"));
            }
            SessionEvent::Failed { message } => {
                log_debug(&format!("capture session failed: {message}"));
                self.stop_listening();
                self.show_status_notice(Notice::error("Microphone unavailable (see log)"));
            }
        }
        self.request_redraw();
    }

    fn record_detection(&mut self, label: String) {
        log_debug_content(&format!("detected: {label}"));
        self.detection_notice = Some(TimedNotice {
            notice: Notice::info(format!("Detected: {label}")),
            expires_at: Instant::now() + DETECTION_NOTICE_TTL,
        });
        self.detections.push(label);
    }

    fn show_status_notice(&mut self, notice: Notice) {
        self.status_notice = Some(TimedNotice {
            notice,
            expires_at: Instant::now() + STATUS_NOTICE_TTL,
        });
    }

    /// Keyboard test path: keys `1`-`4` inject fixed labels straight into
    /// the history, bypassing the scheduler. Returns whether the key mapped.
    pub fn push_test_key(&mut self, key: char) -> bool {
        let Some(label) = test_label_for_key(key) else {
            return false;
        };
        self.record_detection(label.to_string());
        self.request_redraw();
        true
    }

    /// Expire transient notices.
    pub fn tick(&mut self, now: Instant) {
        let mut changed = false;
        if matches!(&self.detection_notice, Some(timed) if now >= timed.expires_at) {
            self.detection_notice = None;
            changed = true;
        }
        if matches!(&self.status_notice, Some(timed) if now >= timed.expires_at) {
            self.status_notice = None;
            changed = true;
        }
        if changed {
            self.request_redraw();
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Capture => View::Board,
            View::Board => View::Capture,
        };
        self.request_redraw();
    }

    // Board view -----------------------------------------------------------

    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor / 3) as i32 + d_row;
        let col = (self.cursor % 3) as i32 + d_col;
        let row = row.clamp(0, 2) as usize;
        let col = col.clamp(0, 2) as usize;
        let cursor = row * 3 + col;
        if cursor != self.cursor {
            self.cursor = cursor;
            self.request_redraw();
        }
    }

    /// Place the current turn's marker at the cursor. Rejected moves
    /// (occupied cell, game already won) are silent no-ops.
    pub fn play_cursor(&mut self) {
        let next = apply_move(&self.board, self.turn, self.cursor);
        if next != self.board {
            self.board = next;
            self.turn = next_turn(self.turn);
            self.request_redraw();
        }
    }

    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.turn = Marker::X;
        self.cursor = 0;
        self.request_redraw();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Marker {
        self.turn
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn board_status(&self) -> String {
        status_line(&self.board, self.turn)
    }

    // Render accessors ------------------------------------------------------

    pub fn detections(&self) -> &DetectionLog {
        &self.detections
    }

    pub fn detection_notice(&self) -> Option<&Notice> {
        self.detection_notice.as_ref().map(|timed| &timed.notice)
    }

    pub fn status_notice(&self) -> Option<&Notice> {
        self.status_notice.as_ref().map(|timed| &timed.notice)
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn meter_db(&self) -> f32 {
        self.meter.level_db()
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn take_redraw_request(&mut self) -> bool {
        let requested = self.needs_redraw;
        self.needs_redraw = false;
        requested
    }
}
