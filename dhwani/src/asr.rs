//! Speech-to-text boundary.

use crate::audio;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::time::Duration;

/// Transcribes mono 16kHz samples to text.
///
/// Returns `Ok(None)` when the recognizer produced no usable transcript,
/// which the pipeline treats differently from a transport failure.
pub trait SpeechToText {
    fn transcribe(&self, samples: &[f32]) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct Recognized {
    text: String,
}

/// HTTP client for a Vosk-style recognizer endpoint.
///
/// Posts raw 16-bit little-endian PCM and expects `{"text": ...}` back.
pub struct RecognizerClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl RecognizerClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("failed to build recognizer http client")?;

        Ok(Self { endpoint, http })
    }
}

impl SpeechToText for RecognizerClient {
    fn transcribe(&self, samples: &[f32]) -> Result<Option<String>> {
        let pcm = audio::to_pcm16_bytes(samples);

        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = pcm.len(),
            "sending audio to recognizer"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(pcm)
            .send()
            .wrap_err("recognizer request failed")?
            .error_for_status()
            .wrap_err("recognizer returned an error status")?;

        let recognized: Recognized = response
            .json()
            .wrap_err("malformed recognizer response")?;

        let text = recognized.text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}
