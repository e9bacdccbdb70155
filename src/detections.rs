//! Append-only detection history and the transient notices shown next to it.

/// Labels injected by the keyboard test path, bypassing the capture
/// scheduler entirely. Keys `1`-`4` map to the fixed labels the classifier
/// is trained on, so the UI can be exercised without live audio.
pub fn test_label_for_key(key: char) -> Option<&'static str> {
    match key {
        '1' => Some("Running Water"),
        '2' => Some("Stove ON"),
        '3' => Some("Front Door"),
        '4' => Some("Stove OFF"),
        _ => None,
    }
}

/// One classified sound. The timestamp is implicit in the history order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionEvent {
    label: String,
}

impl DetectionEvent {
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered, append-only history of detections. Entries are never removed or
/// edited once added.
#[derive(Debug, Default)]
pub struct DetectionLog {
    events: Vec<DetectionEvent>,
}

impl DetectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.events.push(DetectionEvent {
            label: label.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectionEvent> {
        self.events.iter()
    }
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A short-lived, user-visible notice. The owner decides when it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}
