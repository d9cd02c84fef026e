//! Normalize Event Example
//!
//! Reads one raw Slack event, normalizes it against the static directory in
//! `pewter.toml`, and prints the resulting entity as JSON.
//!
//! # Usage
//!
//! ```bash
//! cd demos/normalize_event
//! cargo run -- events/channel_message.json
//! cat events/direct_message.json | cargo run
//! ```
//!
//! With `--callback`, text messages are built through the callback-based
//! factory instead of the normalizer's async path.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pewter::prelude::*;
use pewter::slack::{RawMessage, SlackEvent, User};
use tokio::sync::oneshot;

#[derive(Parser, Debug)]
#[command(version, about = "Normalize a raw Slack event")]
struct Args {
    /// Event JSON file; reads stdin when omitted.
    event: Option<PathBuf>,

    /// Configuration file (defaults to searching for pewter.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile.
    #[arg(short, long)]
    profile: Option<String>,

    /// Build text messages with the callback factory.
    #[arg(long)]
    callback: bool,
}

async fn read_event(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("reading stdin"),
    }
}

/// Builds a text message through [`create_text_message`] and waits for it.
async fn normalize_with_callback(
    raw: RawMessage,
    slack: &SlackConfig,
    lookup: Arc<dyn Lookup>,
) -> Result<SlackMessage> {
    let sender_id = raw
        .sender_id()
        .map(str::to_owned)
        .context("message has no sender")?;
    let sender = lookup
        .fetch_user(&sender_id)
        .await
        .unwrap_or_else(|_| User::from_id(&sender_id));

    let params = TextMessageParams::new(sender, raw, slack.bot_name.clone())
        .with_alias(slack.bot_alias.clone());

    let (tx, rx) = oneshot::channel();
    create_text_message(params, lookup, move |result| {
        let _ = tx.send(result);
    });

    let message = rx.await.context("text message task dropped")??;
    Ok(SlackMessage::Text(message))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }
    let config = bootstrap(loader)?;

    let slack: SlackConfig = config.adapter_config("slack")?.unwrap_or_default();
    let lookup: Arc<dyn Lookup> = Arc::new(DirectoryLookup::from_config(&slack.directory));
    info!(bot = %slack.bot_name, "Slack normalizer ready");

    let raw = read_event(args.event.as_ref()).await?;
    let message = match SlackEvent::parse(&raw)? {
        SlackEvent::Message(msg) if args.callback => {
            normalize_with_callback(msg, &slack, lookup).await?
        }
        event => {
            let normalizer = SlackNormalizer::new(slack, lookup);
            match normalizer.normalize_event(event).await? {
                Some(message) => message,
                None => bail!("event was not normalized (unsupported type or subtype)"),
            }
        }
    };

    let event = message.as_event();
    info!(
        event = event.event_name(),
        sender = ?event.sender_id(),
        "Normalized {:?} event",
        event.event_type()
    );
    println!("{}", serde_json::to_string_pretty(&message)?);

    Ok(())
}
