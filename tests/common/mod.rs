//! Common test utilities for integration tests
//!
//! Provides shared components used across multiple integration test files.

#![allow(dead_code)]

use anyhow::Result;
use confluent::{ComponentContext, ConfigComponent, ConfigPatch, Configuration};
use serde_json::Value;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Always-enabled component writing one entry under a chosen name
pub struct Fixed {
    pub name: String,
    pub key: String,
    pub value: Value,
}

impl Fixed {
    pub fn new(name: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl ConfigComponent for Fixed {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        Ok(Configuration::new().with(self.key.clone(), self.value.clone()))
    }
}

/// Enabled only while `key` is present in the working configuration
pub struct WhenKey {
    pub name: String,
    pub key: String,
    pub patch: Configuration,
}

impl WhenKey {
    pub fn new(name: impl Into<String>, key: impl Into<String>, patch: Configuration) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            patch,
        }
    }
}

impl ConfigComponent for WhenKey {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_enabled(&self, config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<bool> {
        Ok(config.contains_key(&self.key))
    }

    fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        Ok(self.patch.clone())
    }
}
