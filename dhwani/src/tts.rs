//! Text-to-speech client with bounded retry.

use eyre::{Result, eyre};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Default voice used when none is configured.
pub const DEFAULT_VOICE_ID: &str = "bIHbv24MWmeRgasZH58o";

const MODEL_ID: &str = "eleven_multilingual_v2";
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(3);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One failed synthesis attempt.
#[derive(Debug, Error)]
enum AttemptError {
    /// Transport or status failure, worth retrying
    #[error("tts request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with something other than audio; retrying
    /// will not change its mind
    #[error("unexpected tts content type: {0:?}")]
    ContentType(String),
}

/// ElevenLabs-style synthesis client.
///
/// Posts text to `/v1/text-to-speech/{voice_id}` and returns MPEG audio
/// bytes. Transient failures are retried up to 3 attempts with a fixed
/// 3-second delay.
pub struct TtsClient {
    base_url: String,
    api_key: String,
    voice_id: String,
    http: reqwest::blocking::Client,
    pub(crate) max_attempts: u32,
    pub(crate) retry_delay: Duration,
}

impl TtsClient {
    pub fn new(base_url: String, api_key: String, voice_id: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| eyre!("failed to build tts http client: {e}"))?;

        Ok(Self {
            base_url,
            api_key,
            voice_id,
            http,
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Synthesize speech audio for the given text.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let body = json!({
            "text": text,
            "model_id": MODEL_ID,
            "voice_settings": {
                "stability": 0.6,
                "similarity_boost": 0.6,
            },
        });

        let mut last_error = eyre!("tts was never attempted");

        for attempt in 1..=self.max_attempts {
            match self.attempt(&body) {
                Ok(audio) => {
                    tracing::debug!(attempt, bytes = audio.len(), "received audio");
                    return Ok(audio);
                }
                Err(e @ AttemptError::ContentType(_)) => {
                    return Err(eyre!(e).wrap_err("tts service did not return audio"));
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "tts request failed, retrying");
                    last_error = eyre!(e);
                    if attempt < self.max_attempts {
                        std::thread::sleep(self.retry_delay);
                    }
                }
            }
        }

        Err(last_error.wrap_err(format!(
            "failed to generate audio after {} attempts",
            self.max_attempts
        )))
    }

    fn attempt(&self, body: &serde_json::Value) -> Result<Vec<u8>, AttemptError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            self.voice_id,
        );

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(body)
            .send()?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.contains("audio/mpeg") {
            return Err(AttemptError::ContentType(content_type));
        }

        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }
}
