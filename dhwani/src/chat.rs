//! Chat subcommand - run the full voice pipeline on an audio clip.

use crate::asr::RecognizerClient;
use crate::audio;
use crate::cli::TranslatorArgs;
use crate::config::{self, ServiceConfig};
use crate::pipeline::VoicePipeline;
use crate::reply::ReplyClient;
use crate::store::ConversationStore;
use crate::tts::{self, TtsClient};
use eyre::{OptionExt, Result, WrapErr};
use std::path::PathBuf;

/// CLI arguments for the voice pipeline.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the spoken input clip (16kHz mono WAV)
    pub path: PathBuf,

    /// Output path for the synthesized reply audio (default: input with .mp3)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TTS voice id
    #[arg(long)]
    pub voice: Option<String>,

    /// Conversation store path
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[command(flatten)]
    pub translator: TranslatorArgs,
}

/// Resolved configuration for the voice pipeline.
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub output: PathBuf,
    pub voice: String,
    pub store: PathBuf,
    pub translator: TranslatorArgs,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let output = args
            .output
            .unwrap_or_else(|| args.path.with_extension("mp3"));

        Ok(Self {
            path: args.path,
            output,
            voice: args.voice.unwrap_or_else(|| tts::DEFAULT_VOICE_ID.to_string()),
            store: args.store.unwrap_or_else(config::default_store_path),
            translator: args.translator,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let samples = audio::read_speech_mono(&config.path)
        .wrap_err_with(|| format!("failed to load {:?}", config.path.display()))?;

    let services = ServiceConfig::from_env();

    let asr = RecognizerClient::new(services.asr_url.clone())?;
    let reply = ReplyClient::new(services.llm_url.clone(), services.llm_model.clone())?;
    let translator = config::build_translator(&config.translator, &services)?;

    let api_key = services
        .tts_api_key
        .clone()
        .ok_or_eyre("DHWANI_TTS_API_KEY is not set")?;
    let tts = TtsClient::new(services.tts_url.clone(), api_key, config.voice)?;

    let store = ConversationStore::new(config.store);

    let pipeline = VoicePipeline {
        asr: &asr,
        reply: &reply,
        translator: translator.as_ref(),
        tts: &tts,
        store: &store,
    };

    let result = pipeline.run(&samples)?;

    std::fs::write(&config.output, &result.audio)
        .wrap_err_with(|| format!("failed to write {:?}", config.output.display()))?;

    println!("you said:    {}", result.transcript);
    println!("reply:       {}", result.reply);
    println!("translation: {}", result.translation);
    println!("audio:       {}", config.output.display());

    Ok(())
}
