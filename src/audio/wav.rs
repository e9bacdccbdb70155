//! In-memory WAV encoding for segment uploads.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Encodes mono f32 PCM as a 16-bit WAV payload at `sample_rate`.
pub fn encode_wav_mono(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).context("failed to start the WAV encoder")?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer
            .write_sample((clamped * f32::from(i16::MAX)) as i16)
            .context("failed to encode a WAV sample")?;
    }
    writer.finalize().context("failed to finalize the WAV payload")?;
    Ok(cursor.into_inner())
}
