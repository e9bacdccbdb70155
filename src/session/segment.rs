use super::CloseReason;
use crate::audio::SharedBuffer;
use crate::log_debug;

/// One bounded capture window over the session's shared sample buffer.
///
/// Both session timers call [`close`](Segment::close); the liveness flag
/// makes the second close a no-op, so at most one close effect applies per
/// segment no matter which timer fires first.
pub(crate) struct Segment {
    buffer: SharedBuffer,
    closed: bool,
}

impl Segment {
    /// Starts a fresh window: whatever the stream pushed since the previous
    /// close belongs to the new segment, so the buffer is cleared here.
    pub(crate) fn begin(buffer: SharedBuffer) -> Self {
        if let Ok(mut samples) = buffer.lock() {
            samples.clear();
        }
        Self {
            buffer,
            closed: false,
        }
    }

    /// Takes the buffered audio on the first call; every later call returns
    /// `None` without touching the buffer.
    pub(crate) fn close(&mut self, reason: CloseReason) -> Option<Vec<f32>> {
        if self.closed {
            return None;
        }
        self.closed = true;
        let samples = self
            .buffer
            .lock()
            .map(|mut samples| std::mem::take(&mut *samples))
            .unwrap_or_default();
        log_debug(&format!(
            "segment closed ({}) with {} samples",
            reason.label(),
            samples.len()
        ));
        Some(samples)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }
}
