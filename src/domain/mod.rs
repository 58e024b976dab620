//! Domain layer for configuration composition
//!
//! This module contains the configuration model, the component port and the
//! registry error types.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::RegistryError;
