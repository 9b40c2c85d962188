//! Configuration module for mapbot
//!
//! Provides types and loading for the `mapbot.toml` configuration file.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::*;
