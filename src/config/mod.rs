//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use clap::Parser;

pub use defaults::{
    DEFAULT_ENDPOINT, DEFAULT_FLUSH_MAX_MS, DEFAULT_FLUSH_MIN_MS, DEFAULT_SEGMENT_MS,
    DEFAULT_UPLOAD_SAMPLE_RATE, DEFAULT_UPLOAD_TIMEOUT_MS, MAX_UPLOAD_SAMPLE_RATE,
    MIN_UPLOAD_SAMPLE_RATE,
};

use crate::session::SessionConfig;

/// CLI options for the SoundWatch TUI. Validated values keep the capture
/// scheduler and upload path safe.
#[derive(Debug, Parser, Clone)]
#[command(about = "SoundWatch TUI", author, version)]
pub struct AppConfig {
    /// Classification endpoint receiving segment uploads
    #[arg(long, env = "SOUNDWATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Preferred audio input device name
    #[arg(long)]
    pub input_device: Option<String>,

    /// Print detected audio input devices and exit
    #[arg(long = "list-input-devices", default_value_t = false)]
    pub list_input_devices: bool,

    /// Maximum segment duration before it is closed and submitted (milliseconds)
    #[arg(long = "segment-ms", default_value_t = DEFAULT_SEGMENT_MS)]
    pub segment_ms: u64,

    /// Lower bound for the randomized segment flush interval (milliseconds)
    #[arg(long = "flush-min-ms", default_value_t = DEFAULT_FLUSH_MIN_MS)]
    pub flush_min_ms: u64,

    /// Upper bound for the randomized segment flush interval (milliseconds)
    #[arg(long = "flush-max-ms", default_value_t = DEFAULT_FLUSH_MAX_MS)]
    pub flush_max_ms: u64,

    /// Sample rate of uploaded audio (Hz)
    #[arg(long = "upload-sample-rate", default_value_t = DEFAULT_UPLOAD_SAMPLE_RATE)]
    pub upload_sample_rate: u32,

    /// Upload timeout (milliseconds)
    #[arg(long = "upload-timeout-ms", default_value_t = DEFAULT_UPLOAD_TIMEOUT_MS)]
    pub upload_timeout_ms: u64,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "SOUNDWATCH_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "SOUNDWATCH_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging detected labels (debug log only)
    #[arg(
        long = "log-content",
        env = "SOUNDWATCH_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,

    /// Enable verbose timing logs
    #[arg(long)]
    pub log_timings: bool,
}

impl AppConfig {
    /// The slice of the config the session worker needs.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::from_app(self)
    }
}
