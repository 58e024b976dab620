//! Configuration management infrastructure
//!
//! Hierarchical settings for the `confluent` binary using figment:
//! - Programmatic defaults
//! - YAML file loading
//! - Environment variable overrides
//! - Settings validation

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{OutputConfig, Settings};
