//! Pewter Runtime - configuration and logging for Pewter adapters.
//!
//! This crate provides:
//! - Layered configuration loading ([`ConfigLoader`]) and validation
//! - Logging initialisation ([`LoggingBuilder`], [`logging::init_from_config`])
//! - [`bootstrap`], which does both in one call
//!
//! ```ignore
//! use pewter_runtime::{ConfigLoader, bootstrap};
//! use pewter_adapter_slack::SlackConfig;
//!
//! let config = bootstrap(ConfigLoader::new())?;
//! let slack: SlackConfig = config.adapter_config("slack")?.unwrap_or_default();
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LoggingConfig, PewterConfig, Profile, validate_config,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Loads and validates configuration, then initialises logging from it.
///
/// # Errors
/// Returns [`RuntimeError::Config`] if loading or validation fails.
pub fn bootstrap(loader: ConfigLoader) -> RuntimeResult<PewterConfig> {
    let config = loader.load()?;
    validate_config(&config)?;
    logging::init_from_config(&config.logging);
    tracing::debug!(adapters = ?config.adapters.keys().collect::<Vec<_>>(), "Runtime bootstrapped");
    Ok(config)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
