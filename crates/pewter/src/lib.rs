//! # Pewter
//!
//! Normalizes raw chat-platform events into typed entities for command
//! dispatch.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │  raw event   │────▶│  Adapter (Slack)  │────▶│  BoxedEvent  │────▶ dispatch
//! └──────────────┘     └─────────┬─────────┘     └──────────────┘
//!                                │ lookups
//!                        ┌───────▼───────┐
//!                        │ Lookup (user, │
//!                        │ conversation) │
//!                        └───────────────┘
//! ```
//!
//! - **Core**: the host event trait and the error taxonomy
//! - **Adapters**: platform payload models and normalization
//! - **Runtime**: configuration and logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pewter::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = bootstrap(ConfigLoader::new())?;
//!     let slack: SlackConfig = config.adapter_config("slack")?.unwrap_or_default();
//!     let lookup = Arc::new(DirectoryLookup::from_config(&slack.directory));
//!     let normalizer = SlackNormalizer::new(slack, lookup);
//!
//!     if let Some(message) = normalizer.normalize(RAW).await? {
//!         info!("{:?}", message.as_event().plain_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `adapter-slack`: Slack adapter (default)
//! - `toml-config` / `yaml-config`: configuration file formats
//! - `json-log`: JSON log output

pub use pewter_core as core;
pub use pewter_runtime as runtime;

#[cfg(feature = "adapter-slack")]
pub use pewter_adapter_slack as slack;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pewter::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use pewter_core::{
        AdapterError, AdapterResult, BoxedEvent, Event, EventType, LookupError, LookupResult,
    };

    // Runtime
    pub use pewter_runtime::{ConfigLoader, PewterConfig, bootstrap};
    pub use pewter_runtime::prelude::*;

    // Slack
    #[cfg(feature = "adapter-slack")]
    pub use pewter_adapter_slack::{
        DirectoryLookup, Lookup, Mention, SlackConfig, SlackMessage, SlackNormalizer, TextMessage,
        TextMessageParams, create_text_message,
    };
}
