//! Built-in components.
//!
//! - [`StaticComponent`]: a fixed, named patch
//! - [`FnComponent`]: closure-backed component for small ad-hoc layers
//! - [`Gated`]: wraps any component with a declarative [`EnableCondition`]

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::{ConfigPatch, Configuration};
use crate::domain::ports::{ComponentContext, ConfigComponent};

/// Always-enabled component contributing a fixed patch
#[derive(Debug, Clone, PartialEq)]
pub struct StaticComponent {
    name: String,
    entries: Configuration,
}

impl StaticComponent {
    /// Component named `name` contributing `entries`
    pub fn new(name: impl Into<String>, entries: Configuration) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// The patch contributed on every fold
    pub const fn entries(&self) -> &Configuration {
        &self.entries
    }
}

impl ConfigComponent for StaticComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        Ok(self.entries.clone())
    }
}

type EnabledFn = dyn Fn(&Configuration) -> Result<bool> + Send + Sync;
type ConfigureFn = dyn Fn(&Configuration) -> Result<ConfigPatch> + Send + Sync;

/// Component built from closures
///
/// ```
/// use confluent::services::FnComponent;
/// use confluent::domain::models::Configuration;
///
/// let debug = FnComponent::new("debug", |_cfg| Ok(Configuration::new().with("verbose", true)))
///     .enabled_when(|cfg| Ok(cfg.get_str("env") == Some("dev")));
/// ```
pub struct FnComponent {
    name: String,
    enabled: Option<Box<EnabledFn>>,
    configure: Box<ConfigureFn>,
}

impl FnComponent {
    /// Always-enabled component running `configure`
    pub fn new<F>(name: impl Into<String>, configure: F) -> Self
    where
        F: Fn(&Configuration) -> Result<ConfigPatch> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            enabled: None,
            configure: Box::new(configure),
        }
    }

    /// Set the enablement predicate; without one the component is always enabled
    #[must_use]
    pub fn enabled_when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Configuration) -> Result<bool> + Send + Sync + 'static,
    {
        self.enabled = Some(Box::new(predicate));
        self
    }
}

impl fmt::Debug for FnComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("name", &self.name)
            .field("conditional", &self.enabled.is_some())
            .finish_non_exhaustive()
    }
}

impl ConfigComponent for FnComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_enabled(&self, config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<bool> {
        self.enabled.as_ref().map_or(Ok(true), |predicate| predicate(config))
    }

    fn configure(&self, config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        (self.configure)(config)
    }
}

/// Declarative enablement rule evaluated against the working configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EnableCondition {
    /// Always matches
    #[default]
    Always,
    /// `key` is present, whatever its value
    KeyPresent {
        /// Top-level key
        key: String,
    },
    /// `key` is absent
    KeyAbsent {
        /// Top-level key
        key: String,
    },
    /// `key` is present and equal to `value`
    KeyEquals {
        /// Top-level key
        key: String,
        /// Expected value
        value: Value,
    },
    /// Every condition matches
    All {
        /// Conditions to combine
        conditions: Vec<EnableCondition>,
    },
    /// At least one condition matches
    Any {
        /// Conditions to combine
        conditions: Vec<EnableCondition>,
    },
    /// The condition does not match
    Not {
        /// Condition to negate
        condition: Box<EnableCondition>,
    },
}

impl EnableCondition {
    /// [`EnableCondition::KeyPresent`]
    pub fn key_present(key: impl Into<String>) -> Self {
        Self::KeyPresent { key: key.into() }
    }

    /// [`EnableCondition::KeyAbsent`]
    pub fn key_absent(key: impl Into<String>) -> Self {
        Self::KeyAbsent { key: key.into() }
    }

    /// [`EnableCondition::KeyEquals`]
    pub fn key_equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::KeyEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check the condition against a configuration
    pub fn matches(&self, config: &Configuration) -> bool {
        match self {
            Self::Always => true,
            Self::KeyPresent { key } => config.contains_key(key),
            Self::KeyAbsent { key } => !config.contains_key(key),
            Self::KeyEquals { key, value } => config.get(key) == Some(value),
            // Empty `All` matches, empty `Any` does not
            Self::All { conditions } => conditions.iter().all(|c| c.matches(config)),
            Self::Any { conditions } => conditions.iter().any(|c| c.matches(config)),
            Self::Not { condition } => !condition.matches(config),
        }
    }
}

/// Wraps a component so it only runs when a condition holds
///
/// The wrapped component's own `is_enabled` is still consulted, after the
/// condition. The wrapper reports the inner component's name.
#[derive(Debug, Clone)]
pub struct Gated<C> {
    inner: C,
    condition: EnableCondition,
}

impl<C> Gated<C> {
    /// Run `inner` only while `condition` matches
    pub const fn new(inner: C, condition: EnableCondition) -> Self {
        Self { inner, condition }
    }

    /// The gating condition
    pub const fn condition(&self) -> &EnableCondition {
        &self.condition
    }

    /// Unwrap the gated component
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: ConfigComponent> ConfigComponent for Gated<C> {
    fn type_name() -> String {
        C::type_name()
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn is_enabled(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<bool> {
        if !self.condition.matches(config) {
            return Ok(false);
        }
        self.inner.is_enabled(config, ctx)
    }

    fn configure(&self, config: &Configuration, ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        self.inner.configure(config, ctx)
    }
}
