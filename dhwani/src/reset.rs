//! Reset subcommand - clear the conversation store.

use crate::config;
use crate::store::ConversationStore;
use eyre::Result;
use std::path::PathBuf;

/// CLI arguments for resetting the conversation.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Conversation store path
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Resolved configuration for resetting the conversation.
#[derive(Debug)]
pub struct Config {
    pub store: PathBuf,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            store: args.store.unwrap_or_else(config::default_store_path),
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let store = ConversationStore::new(config.store.clone());
    store.reset()?;

    tracing::info!(path = %config.store.display(), "conversation reset");
    println!("conversation reset");

    Ok(())
}
