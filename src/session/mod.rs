//! Recording session worker: slices microphone input into bounded segments
//! and submits each one to the classifier.
//!
//! A session runs on one worker thread that owns the exclusive capture
//! stream for its whole life. Two timers race to close the current segment:
//! a fixed per-segment deadline and an independent flush ticker whose
//! interval is drawn uniformly from a configured range once per session, so
//! segment lengths vary. [`Segment::close`] is idempotent, which
//! makes the losing timer's close a provable no-op. Uploads are
//! fire-and-forget on detached threads; once the session handle is dropped
//! the event channel disconnects and late results are discarded.

mod segment;

pub(crate) use segment::Segment;

use crate::audio::{
    encode_wav_mono, resample_to_rate, LiveMeter, Recorder, SharedBuffer, METER_FLOOR_DB,
};
use crate::classify::Classify;
use crate::config::AppConfig;
use crate::log_debug;
use crossbeam_channel::{after, bounded, select, tick, Receiver, Sender, TryRecvError};
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Durations and flags the worker needs, decoupled from the full CLI config.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum segment length before it is closed and submitted.
    pub segment: Duration,
    /// Bounds for the per-session flush ticker interval.
    pub flush_min: Duration,
    pub flush_max: Duration,
    /// Sample rate of the uploaded WAV payload.
    pub upload_rate: u32,
    pub log_timings: bool,
}

impl SessionConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            segment: Duration::from_millis(config.segment_ms),
            flush_min: Duration::from_millis(config.flush_min_ms),
            flush_max: Duration::from_millis(config.flush_max_ms),
            upload_rate: config.upload_sample_rate,
            log_timings: config.log_timings,
        }
    }
}

/// Why a segment was closed. Only used for logging; the caller decides what
/// happens to the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The fixed per-segment deadline elapsed.
    SegmentFull,
    /// The randomized flush ticker fired first.
    FlushTick,
    /// The session was disabled; the open segment is discarded.
    Disabled,
}

impl CloseReason {
    pub fn label(self) -> &'static str {
        match self {
            CloseReason::SegmentFull => "segment_full",
            CloseReason::FlushTick => "flush_tick",
            CloseReason::Disabled => "disabled",
        }
    }
}

/// Messages sent from the session worker (and its upload threads) back to
/// the UI.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The capture stream is live.
    Listening { device: String },
    /// An upload succeeded; `label` goes into the detection history.
    Detection { label: String },
    /// An upload failed; the history stays untouched.
    UploadFailed { message: String },
    /// The session could not start (microphone denied or unavailable) or
    /// died. The worker has already released everything.
    Failed { message: String },
}

/// Handle owning an active capture session. Exactly one exists at a time;
/// dropping it stops the worker and releases the microphone.
pub struct RecordingSession {
    events: Receiver<SessionEvent>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RecordingSession {
    /// Spawn the session worker. Microphone acquisition happens on the
    /// worker, so failures arrive as [`SessionEvent::Failed`] rather than
    /// as a return value.
    pub fn start(
        recorder: Arc<Mutex<Recorder>>,
        classifier: Arc<dyn Classify>,
        config: SessionConfig,
        meter: LiveMeter,
    ) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::spawn(move || {
            run_session(recorder, classifier, config, meter, events_tx, stop_rx);
        });
        Self {
            events: events_rx,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Non-blocking poll for the next worker event.
    pub fn try_event(&self) -> Result<SessionEvent, TryRecvError> {
        self.events.try_recv()
    }

    /// Idempotent teardown: signals the worker, waits for it to drop the
    /// capture stream and flush ticker, then returns. Safe to call when the
    /// worker already exited.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        events: Receiver<SessionEvent>,
        stop_tx: Sender<()>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            events,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_session(
    recorder: Arc<Mutex<Recorder>>,
    classifier: Arc<dyn Classify>,
    config: SessionConfig,
    meter: LiveMeter,
    events: Sender<SessionEvent>,
    stop: Receiver<()>,
) {
    let buffer: SharedBuffer = Arc::new(Mutex::new(Vec::new()));
    let capture = {
        let recorder = match recorder.lock() {
            Ok(recorder) => recorder,
            Err(_) => {
                let _ = events.send(SessionEvent::Failed {
                    message: "audio recorder lock poisoned".to_string(),
                });
                return;
            }
        };
        match recorder.open_capture(buffer.clone(), meter.clone()) {
            Ok(capture) => capture,
            Err(err) => {
                log_debug(&format!("microphone acquisition failed: {err:#}"));
                let _ = events.send(SessionEvent::Failed {
                    message: format!("{err:#}"),
                });
                return;
            }
        }
    };
    tracing::info!(device = %capture.device_name, "capture session started");
    let _ = events.send(SessionEvent::Listening {
        device: capture.device_name.clone(),
    });

    // One uniform draw per session, repeated by the ticker; matches the
    // fixed-interval flush of the original front-end.
    let flush_interval = pick_flush_interval(config.flush_min, config.flush_max);
    log_debug(&format!(
        "flush ticker every {}ms, segment cap {}ms",
        flush_interval.as_millis(),
        config.segment.as_millis()
    ));
    let flush = tick(flush_interval);

    'session: loop {
        let mut segment = Segment::begin(buffer.clone());
        let deadline = after(config.segment);
        let samples = loop {
            select! {
                recv(deadline) -> _ => {
                    if let Some(samples) = segment.close(CloseReason::SegmentFull) {
                        break samples;
                    }
                }
                recv(flush) -> _ => {
                    if let Some(samples) = segment.close(CloseReason::FlushTick) {
                        break samples;
                    }
                }
                recv(stop) -> _ => {
                    // Disable discards whatever the open segment holds.
                    segment.close(CloseReason::Disabled);
                    break 'session;
                }
            }
        };
        if samples.is_empty() {
            continue;
        }
        submit_segment(samples, capture.sample_rate, &config, &classifier, &events);
    }

    drop(capture);
    meter.set_db(METER_FLOOR_DB);
    tracing::info!("capture session ended");
    log_debug("capture session ended; microphone released");
}

fn pick_flush_interval(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let min_ms = min.as_millis() as u64;
    let max_ms = max.as_millis() as u64;
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

/// Resamples and encodes the closed segment, then hands the upload to a
/// detached thread so the next segment starts without a gap. Results from a
/// session that stopped in the meantime die on the disconnected channel.
fn submit_segment(
    samples: Vec<f32>,
    device_rate: u32,
    config: &SessionConfig,
    classifier: &Arc<dyn Classify>,
    events: &Sender<SessionEvent>,
) {
    let pcm = resample_to_rate(&samples, device_rate, config.upload_rate);
    let wav = match encode_wav_mono(&pcm, config.upload_rate) {
        Ok(wav) => wav,
        Err(err) => {
            log_debug(&format!("segment encode failed: {err:#}"));
            let _ = events.send(SessionEvent::UploadFailed {
                message: format!("{err:#}"),
            });
            return;
        }
    };

    let classifier = classifier.clone();
    let events = events.clone();
    let log_timings = config.log_timings;
    thread::spawn(move || {
        let started = Instant::now();
        match classifier.classify(wav) {
            Ok(prediction) => {
                if log_timings {
                    log_debug(&format!(
                        "timing|phase=segment_upload|upload_s={:.3}",
                        started.elapsed().as_secs_f64()
                    ));
                }
                tracing::info!(label = %prediction.predicted_class, "segment classified");
                let _ = events.send(SessionEvent::Detection {
                    label: prediction.predicted_class,
                });
            }
            Err(err) => {
                log_debug(&format!("segment upload failed: {err:#}"));
                let _ = events.send(SessionEvent::UploadFailed {
                    message: format!("{err:#}"),
                });
            }
        }
    });
}

#[cfg(test)]
pub(crate) fn submit_segment_for_tests(
    samples: Vec<f32>,
    device_rate: u32,
    config: &SessionConfig,
    classifier: &Arc<dyn Classify>,
    events: &Sender<SessionEvent>,
) {
    submit_segment(samples, device_rate, config, classifier, events);
}
