//! # Pewter Core
//!
//! The shared foundation of the Pewter chat normalization toolkit.
//!
//! Adapters turn raw platform payloads into typed entities. This crate holds
//! what every adapter agrees on:
//!
//! - **Event System**: the host message base type ([`Event`], [`BoxedEvent`])
//!   carrying a sender and a timestamp, with runtime downcasting to the
//!   adapter's concrete entity
//! - **Errors**: the lookup/adapter error taxonomy ([`LookupError`],
//!   [`AdapterError`])
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ raw payload │────▶│   Adapter    │────▶│  BoxedEvent  │────▶ command dispatch
//! └─────────────┘     │   (Slack)    │     └──────────────┘
//!                     └──────┬───────┘
//!                            │ lookups
//!                     ┌──────▼───────┐
//!                     │ lookup svc   │
//!                     └──────────────┘
//! ```

pub mod error;
pub mod event;

pub use error::{AdapterError, AdapterResult, LookupError, LookupResult};
pub use event::{BoxedEvent, Event, EventType};

/// Prelude for common imports.
pub mod prelude {
    pub use super::error::*;
    pub use super::event::*;
}
