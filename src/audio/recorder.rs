//! System microphone recording via CPAL.
//!
//! Handles device enumeration and format conversion. The capture callback
//! downmixes to mono and appends into a shared buffer owned by the session
//! worker; segment boundaries are the worker's business, not the stream's.

use super::dispatch::append_downmixed_samples;
use super::meter::{rms_db, LiveMeter};
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use std::sync::{Arc, Mutex};

/// Shared sample sink between the CPAL callback thread and the session
/// worker.
pub type SharedBuffer = Arc<Mutex<Vec<f32>>>;

/// Audio input device wrapper.
///
/// Abstracts CPAL device handling and provides a single entry point for
/// opening an exclusive capture stream.
pub struct Recorder {
    device: cpal::Device,
}

impl Recorder {
    /// List microphone names so the CLI can expose a human-friendly selector.
    pub fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices = host.input_devices().context("no input devices available")?;
        let mut names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Create a recorder, optionally forcing a specific device so users can
    /// pick the right microphone when a machine exposes multiple inputs.
    pub fn new(preferred_device: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        let device = match preferred_device {
            Some(name) => {
                let mut devices = host.input_devices().context("no input devices available")?;
                devices
                    .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                    .ok_or_else(|| anyhow!("input device '{name}' not found"))?
            }
            None => host
                .default_input_device()
                .context("no default input device available")?,
        };
        Ok(Self { device })
    }

    /// Get the name of the active recording device.
    pub fn device_name(&self) -> String {
        self.device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string())
    }

    /// Open the exclusive capture stream, feeding mono samples into `buffer`
    /// until the returned handle is dropped.
    ///
    /// Every supported sample type is converted to f32 in the callback so
    /// the rest of the pipeline stays format-agnostic. Acquisition failures
    /// (permission denied, device gone) come back as errors carrying a
    /// per-OS permission hint.
    pub fn open_capture(&self, buffer: SharedBuffer, meter: LiveMeter) -> Result<CaptureStream> {
        let default_config = self.device.default_input_config().with_context(|| {
            format!(
                "microphone unavailable; check permissions and availability. {}",
                mic_permission_hint()
            )
        })?;
        let format = default_config.sample_format();
        let device_config: StreamConfig = default_config.into();
        let sample_rate = device_config.sample_rate.0;
        let channels = usize::from(device_config.channels.max(1));
        let device_name = self.device_name();

        log_debug(&format!(
            "capture config: format={format:?} sample_rate={sample_rate}Hz channels={channels}"
        ));

        // Keep the error callback quiet in the UI and mirror issues into the log.
        let err_fn = |err| log_debug(&format!("audio_stream_error: {err}"));

        let stream = match format {
            SampleFormat::F32 => {
                let buffer = buffer.clone();
                let meter = meter.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[f32], _| {
                        push_chunk(&buffer, &meter, data, channels, |sample| sample);
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let buffer = buffer.clone();
                let meter = meter.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[i16], _| {
                        push_chunk(&buffer, &meter, data, channels, |sample| {
                            f32::from(sample) / 32_768.0_f32
                        });
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::U16 => {
                let buffer = buffer.clone();
                let meter = meter.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[u16], _| {
                        push_chunk(&buffer, &meter, data, channels, |sample| {
                            (f32::from(sample) - 32_768.0_f32) / 32_768.0_f32
                        });
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {other:?}")),
        };

        stream.play().with_context(|| {
            format!(
                "failed to start capture on '{device_name}'. {}",
                mic_permission_hint()
            )
        })?;

        Ok(CaptureStream {
            stream,
            sample_rate,
            device_name,
        })
    }
}

/// Live capture handle. Dropping it pauses the stream and releases the
/// microphone, so the stream can never outlive its session.
pub struct CaptureStream {
    stream: cpal::Stream,
    pub sample_rate: u32,
    pub device_name: String,
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        if let Err(err) = self.stream.pause() {
            log_debug(&format!("failed to pause audio stream: {err}"));
        }
    }
}

fn push_chunk<T, F>(buffer: &SharedBuffer, meter: &LiveMeter, data: &[T], channels: usize, convert: F)
where
    T: Copy,
    F: FnMut(T) -> f32,
{
    if let Ok(mut buf) = buffer.lock() {
        let start = buf.len();
        append_downmixed_samples(&mut buf, data, channels, convert);
        meter.set_db(rms_db(&buf[start..]));
    }
}

fn mic_permission_hint() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "macOS: System Settings > Privacy & Security > Microphone (enable your terminal)."
    }
    #[cfg(target_os = "linux")]
    {
        "Linux: check PipeWire/PulseAudio permissions and ensure the device is not muted."
    }
    #[cfg(target_os = "windows")]
    {
        "Windows: Settings > Privacy & Security > Microphone (allow access for your terminal)."
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        "Check OS microphone permissions."
    }
}
