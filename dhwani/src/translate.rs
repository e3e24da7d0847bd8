//! Translate subcommand - translate a sentence and print the result.

use crate::cli::TranslatorArgs;
use crate::config::{self, ServiceConfig};
use eyre::Result;

/// CLI arguments for one-shot translation.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// English sentence to translate
    pub text: String,

    #[command(flatten)]
    pub translator: TranslatorArgs,
}

/// Resolved configuration for one-shot translation.
#[derive(Debug)]
pub struct Config {
    pub text: String,
    pub translator: TranslatorArgs,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            text: args.text,
            translator: args.translator,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let services = ServiceConfig::from_env();
    let translator = config::build_translator(&config.translator, &services)?;

    let translation = translator.translate(&config.text)?;
    println!("{translation}");

    Ok(())
}
