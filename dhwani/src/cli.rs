//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dhwani")]
#[command(about = "Voice-to-voice translation tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full voice pipeline on an audio clip
    Chat(crate::chat::Args),

    /// Translate a sentence and print the result
    Translate(crate::translate::Args),

    /// Reset the conversation store
    Reset(crate::reset::Args),
}

/// Translation backend selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Backend {
    /// Neural seq2seq model restored from a local checkpoint
    Seq2seq,
    /// Neural output degraded to beginner-grade target language
    Noisy,
    /// Translation prompt against the reply service
    Llm,
}

/// Shared backend arguments.
#[derive(clap::Args, Debug)]
pub struct TranslatorArgs {
    /// Translation backend
    #[arg(long, value_enum, default_value = "seq2seq")]
    pub backend: Backend,

    /// Model directory for the neural backends
    #[arg(long)]
    pub model_dir: Option<PathBuf>,

    /// Target language name used in llm translation prompts
    #[arg(long, default_value = "Nepali")]
    pub language: String,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Chat(args) => crate::chat::execute(args.try_into()?),
        Commands::Translate(args) => crate::translate::execute(args.try_into()?),
        Commands::Reset(args) => crate::reset::execute(args.try_into()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_command() {
        let cli = Cli::parse_from(["dhwani", "chat", "clip.wav"]);

        match &cli.command {
            Commands::Chat(crate::chat::Args {
                path,
                output: None,
                translator,
                ..
            }) if path.to_str() == Some("clip.wav") => {
                assert_eq!(translator.backend, Backend::Seq2seq);
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_chat_with_output() {
        let cli = Cli::parse_from(["dhwani", "chat", "clip.wav", "-o", "reply.mp3"]);

        match &cli.command {
            Commands::Chat(crate::chat::Args {
                output: Some(output),
                ..
            }) if output.to_str() == Some("reply.mp3") => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_translate_with_backend() {
        let cli = Cli::parse_from(["dhwani", "translate", "hello there", "--backend", "noisy"]);

        match &cli.command {
            Commands::Translate(crate::translate::Args { text, translator })
                if text == "hello there" =>
            {
                assert_eq!(translator.backend, Backend::Noisy);
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_reset_with_store_path() {
        let cli = Cli::parse_from(["dhwani", "reset", "--store", "/tmp/conv.json"]);

        match &cli.command {
            Commands::Reset(crate::reset::Args { store: Some(store) })
                if store.to_str() == Some("/tmp/conv.json") => {}
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }
}
