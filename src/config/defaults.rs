//! Default values shared between the CLI definition and validation.

use crate::audio::UPLOAD_RATE;

/// Default prediction endpoint of the classification service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/predict-audio/";

/// A segment is force-closed after this long.
pub const DEFAULT_SEGMENT_MS: u64 = 5_000;

/// The randomized flush interval is drawn uniformly from this range once per
/// session.
pub const DEFAULT_FLUSH_MIN_MS: u64 = 5_000;
pub const DEFAULT_FLUSH_MAX_MS: u64 = 10_000;

pub const DEFAULT_UPLOAD_SAMPLE_RATE: u32 = UPLOAD_RATE;
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 10_000;

pub const MIN_UPLOAD_SAMPLE_RATE: u32 = 4_000;
pub const MAX_UPLOAD_SAMPLE_RATE: u32 = 192_000;
