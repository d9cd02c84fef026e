//! # Pewter Adapter for Slack
//!
//! Normalizes raw Slack events into typed entities for command dispatch.
//!
//! ## Overview
//!
//! Slack text arrives with inline markup (`<@U123>`, `<#C456|general>`,
//! `<!here>`, `<https://x.y|site>`). This crate rewrites that markup into
//! readable text while resolving the referenced users and conversations
//! through a [`Lookup`], and records each reference as a [`Mention`].
//!
//! ```text
//! raw JSON ──▶ SlackEvent ──▶ SlackNormalizer ──▶ SlackMessage
//!                                   │
//!                        TextMessage::create
//!                                   │
//!              scan ──▶ resolve (concurrent) ──▶ join in order
//!                                   │
//!                      unescape ──▶ address bot in DMs
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pewter_adapter_slack::{DirectoryLookup, SlackConfig, SlackMessage, SlackNormalizer};
//!
//! let config = SlackConfig::new("hubot");
//! let lookup = Arc::new(DirectoryLookup::from_config(&config.directory));
//! let normalizer = SlackNormalizer::new(config, lookup);
//!
//! if let Some(SlackMessage::Text(msg)) = normalizer.normalize(&raw_json).await? {
//!     println!("{}", msg.text()?);
//! }
//! ```
//!
//! ## Entity Hierarchy
//!
//! ```text
//! SlackMessage
//! ├── Text        (markup resolved, mentions recorded)
//! ├── Reaction    { Added, Removed }
//! ├── FileShared
//! └── Presence    { Active, Away }
//! ```
//!
//! Every variant implements [`pewter_core::Event`] and can be boxed with
//! [`SlackMessage::into_boxed`].

pub mod assemble;
pub mod config;
pub mod lookup;
pub mod model;
pub mod normalizer;
pub mod resolve;

pub use assemble::{AssembledText, BotIdentity, assemble_text};
pub use config::{DirectoryConfig, SlackConfig};
pub use lookup::{ApiCaller, ApiLookup, DirectoryLookup, Lookup};
pub use model::*;
pub use normalizer::SlackNormalizer;
pub use resolve::{BROADCAST_KEYWORDS, Resolution, resolve_token};
