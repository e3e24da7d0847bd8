//! Conversational-reply client and LLM-prompt translation backend.
//!
//! Talks to an Ollama-style chat endpoint. The same client serves two roles:
//! generating English replies for the pipeline, and acting as the `llm`
//! translation backend via a translation prompt with output cleanup.

use dhwani_nmt::error::{Error as NmtError, Result as NmtResult};
use dhwani_nmt::traits::Translator;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

/// Anything that turns a user prompt into a conversational reply.
pub trait ReplyGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for an Ollama-style `/api/chat` endpoint.
pub struct ReplyClient {
    base_url: String,
    model: String,
    http: reqwest::blocking::Client,
}

impl ReplyClient {
    pub fn new(base_url: String, model: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .wrap_err("failed to build reply http client")?;

        Ok(Self {
            base_url,
            model,
            http,
        })
    }

    /// Send one user prompt and return the trimmed reply text.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        tracing::debug!(%url, model = %self.model, "requesting reply");

        let response: ChatResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .wrap_err("reply request failed")?
            .error_for_status()
            .wrap_err("reply service returned an error status")?
            .json()
            .wrap_err("malformed reply response")?;

        Ok(response.message.content.trim().to_string())
    }
}

impl ReplyGenerator for ReplyClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        ReplyClient::generate(self, prompt)
    }
}

/// Translation backend that prompts the reply service.
pub struct LlmTranslator {
    client: ReplyClient,
    target_language: String,
}

impl LlmTranslator {
    pub fn new(client: ReplyClient, target_language: String) -> Self {
        Self {
            client,
            target_language,
        }
    }

    /// Strip the explanations chat models add despite being told not to.
    fn clean(&self, raw: &str) -> String {
        let marker = format!("{} Translation:", self.target_language);

        let mut text = raw.trim();
        if let Some(position) = text.rfind(&marker) {
            text = text[position + marker.len()..].trim_start();
        }

        let first_line = text.lines().next().unwrap_or("");
        let without_note = first_line.split("Note:").next().unwrap_or("");

        without_note.trim().to_string()
    }
}

impl Translator for LlmTranslator {
    fn translate(&self, text: &str) -> NmtResult<String> {
        let prompt = format!(
            "Translate the following English text into {lang}: '{text}' and \
             return only the {lang} translation without any explanations or notes.",
            lang = self.target_language,
        );

        let raw = self
            .client
            .generate(&prompt)
            .map_err(|e| NmtError::Backend(e.into()))?;

        Ok(self.clean(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> LlmTranslator {
        let client = ReplyClient::new("http://127.0.0.1:11434".into(), "llama3".into()).unwrap();
        LlmTranslator::new(client, "Nepali".into())
    }

    #[test]
    fn strips_translation_marker() {
        let t = translator();
        assert_eq!(
            t.clean("Sure! Nepali Translation: म घर जान्छु"),
            "म घर जान्छु"
        );
    }

    #[test]
    fn keeps_only_first_line() {
        let t = translator();
        assert_eq!(t.clean("म घर जान्छु\nHope that helps!"), "म घर जान्छु");
    }

    #[test]
    fn cuts_trailing_note() {
        let t = translator();
        assert_eq!(t.clean("म घर जान्छु Note: informal"), "म घर जान्छु");
    }

    #[test]
    fn passes_through_clean_output() {
        let t = translator();
        assert_eq!(t.clean("  म घर जान्छु  "), "म घर जान्छु");
    }
}
