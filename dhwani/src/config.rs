//! Configuration resolution: environment-derived service settings, default
//! paths, and translation backend construction.
//!
//! Args structs (for CLI parsing) remain in cli.rs and the command modules.

use crate::cli::{Backend, TranslatorArgs};
use crate::reply::{LlmTranslator, ReplyClient};
use dhwani_nmt::models::seq2seq::Seq2SeqModel;
use dhwani_nmt::noisy::NoisyTranslator;
use dhwani_nmt::traits::Translator;
use eyre::{Result, WrapErr};
use std::path::PathBuf;

/// External service endpoints, resolved from the environment with local
/// defaults.
#[derive(Debug)]
pub struct ServiceConfig {
    /// Recognizer endpoint (`DHWANI_ASR_URL`)
    pub asr_url: String,
    /// Reply service base url (`DHWANI_LLM_URL`)
    pub llm_url: String,
    /// Reply model name (`DHWANI_LLM_MODEL`)
    pub llm_model: String,
    /// TTS service base url (`DHWANI_TTS_URL`)
    pub tts_url: String,
    /// TTS API key (`DHWANI_TTS_API_KEY`), required only for synthesis
    pub tts_api_key: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            asr_url: env_or("DHWANI_ASR_URL", "http://127.0.0.1:2700/transcribe"),
            llm_url: env_or("DHWANI_LLM_URL", "http://127.0.0.1:11434"),
            llm_model: env_or("DHWANI_LLM_MODEL", "llama3"),
            tts_url: env_or("DHWANI_TTS_URL", "https://api.elevenlabs.io"),
            tts_api_key: std::env::var("DHWANI_TTS_API_KEY").ok(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Application data directory (`~/.local/share/dhwani` or platform
/// equivalent, falling back to the working directory).
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dhwani")
}

/// Default conversation store location.
pub fn default_store_path() -> PathBuf {
    data_dir().join("conversation.json")
}

/// Default seq2seq model directory.
pub fn default_model_dir() -> PathBuf {
    data_dir().join("model")
}

/// Build the selected translation backend.
///
/// The noisy backend wraps the neural one, degrading its output; the llm
/// backend shares the reply service configuration.
pub fn build_translator(
    args: &TranslatorArgs,
    services: &ServiceConfig,
) -> Result<Box<dyn Translator>> {
    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(default_model_dir);

    let translator: Box<dyn Translator> = match args.backend {
        Backend::Seq2seq => Box::new(
            Seq2SeqModel::from_dir(&model_dir)
                .wrap_err_with(|| format!("failed to load model from {:?}", model_dir.display()))?,
        ),
        Backend::Noisy => {
            let inner = Seq2SeqModel::from_dir(&model_dir)
                .wrap_err_with(|| format!("failed to load model from {:?}", model_dir.display()))?;
            Box::new(NoisyTranslator::new(Box::new(inner)))
        }
        Backend::Llm => {
            let client = ReplyClient::new(services.llm_url.clone(), services.llm_model.clone())?;
            Box::new(LlmTranslator::new(client, args.language.clone()))
        }
    };

    Ok(translator)
}
