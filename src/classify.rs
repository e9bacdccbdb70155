//! Client for the external sound-classification endpoint.
//!
//! Each closed segment goes out as one `multipart/form-data` POST carrying a
//! WAV blob; the endpoint answers with the predicted label. Uploads are never
//! retried; a failure is the caller's to surface.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::time::Duration;

/// Form field carrying the audio blob.
const AUDIO_FIELD: &str = "file";
/// File name attached to the uploaded blob.
const AUDIO_FILE_NAME: &str = "audio.wav";
const AUDIO_MIME: &str = "audio/wav";

/// JSON response shape of the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    pub predicted_class: String,
}

/// Seam between the capture scheduler and the prediction service, so tests
/// can classify without a network.
pub trait Classify: Send + Sync {
    fn classify(&self, wav: Vec<u8>) -> Result<Prediction>;
}

/// HTTP implementation talking to the configured endpoint.
pub struct HttpClassifier {
    client: Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classify for HttpClassifier {
    fn classify(&self, wav: Vec<u8>) -> Result<Prediction> {
        let part = multipart::Part::bytes(wav)
            .file_name(AUDIO_FILE_NAME)
            .mime_str(AUDIO_MIME)
            .context("failed to build the audio form part")?;
        let form = multipart::Form::new().part(AUDIO_FIELD, part);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .with_context(|| format!("failed to reach {}", self.endpoint))?
            .error_for_status()
            .context("classification endpoint returned an error status")?;
        response
            .json::<Prediction>()
            .context("failed to parse the classification response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_parses_the_endpoint_response() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"predicted_class":"Front Door"}"#).expect("valid response");
        assert_eq!(prediction.predicted_class, "Front Door");
    }

    #[test]
    fn prediction_ignores_extra_fields() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"predicted_class":"Stove ON","confidence":0.93}"#)
                .expect("extra fields tolerated");
        assert_eq!(prediction.predicted_class, "Stove ON");
    }

    #[test]
    fn prediction_requires_the_label_field() {
        let parsed = serde_json::from_str::<Prediction>(r#"{"label":"Stove ON"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn http_classifier_keeps_the_configured_endpoint() {
        let classifier = HttpClassifier::new(
            "http://127.0.0.1:8080/predict-audio/",
            Duration::from_secs(10),
        )
        .expect("client builds");
        assert_eq!(classifier.endpoint(), "http://127.0.0.1:8080/predict-audio/");
    }
}
