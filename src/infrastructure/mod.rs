//! Infrastructure layer module
//!
//! Adapters used by the `confluent` binary:
//! - Settings loading (figment: defaults, YAML files, environment)
//! - Logging initialisation (tracing-subscriber)
//! - Reading configuration documents from disk

pub mod config;
pub mod documents;
pub mod logging;
