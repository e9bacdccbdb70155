//! Microphone capture plumbing for the detection pipeline.
//!
//! Audio is captured via CPAL, downmixed to mono in the stream callback, and
//! accumulated in a shared buffer the session worker drains per segment.
//! Before upload the segment is resampled to the upload rate and encoded as
//! 16-bit WAV.

/// Default sample rate for uploaded segments.
pub const UPLOAD_RATE: u32 = 16_000;

mod dispatch;
mod meter;
mod recorder;
mod resample;
mod wav;

pub use meter::{LiveMeter, METER_FLOOR_DB};
pub use recorder::{CaptureStream, Recorder, SharedBuffer};
pub use resample::resample_to_rate;
pub use wav::encode_wav_mono;
