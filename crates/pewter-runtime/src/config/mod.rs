//! Configuration module for Pewter.
//!
//! This module provides layered TOML/YAML configuration loading and
//! validation for logging and per-adapter settings.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config};
pub use schema::{
    LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, PewterConfig, SpanEventConfig,
};
pub use validation::validate_config;
