use super::defaults::{MAX_UPLOAD_SAMPLE_RATE, MIN_UPLOAD_SAMPLE_RATE};
use super::AppConfig;
use anyhow::{bail, Result};
use clap::Parser;

/// Hard ceiling on segment length; anything longer would make the detection
/// latency pointless.
const MAX_SEGMENT_MS: u64 = 60_000;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values before any thread or stream starts.
    pub fn validate(&self) -> Result<()> {
        if self.segment_ms == 0 || self.segment_ms > MAX_SEGMENT_MS {
            bail!(
                "--segment-ms must be between 1 and {MAX_SEGMENT_MS}, got {}",
                self.segment_ms
            );
        }
        if self.flush_min_ms == 0 {
            bail!("--flush-min-ms must be greater than zero");
        }
        if self.flush_max_ms < self.flush_min_ms {
            bail!(
                "--flush-max-ms ({}) cannot be below --flush-min-ms ({})",
                self.flush_max_ms,
                self.flush_min_ms
            );
        }
        if !(MIN_UPLOAD_SAMPLE_RATE..=MAX_UPLOAD_SAMPLE_RATE).contains(&self.upload_sample_rate) {
            bail!(
                "--upload-sample-rate must be between {MIN_UPLOAD_SAMPLE_RATE} and {MAX_UPLOAD_SAMPLE_RATE} Hz, got {}",
                self.upload_sample_rate
            );
        }
        if self.upload_timeout_ms == 0 {
            bail!("--upload-timeout-ms must be greater than zero");
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            bail!("--endpoint must be an http(s) URL, got '{}'", self.endpoint);
        }
        Ok(())
    }
}
