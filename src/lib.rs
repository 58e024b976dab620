//! Confluent - layered configuration composition
//!
//! A configuration mapping is built by folding an ordered list of named,
//! pluggable components over an initial configuration. Each component can
//! inspect what has been assembled so far, decide whether it applies, and
//! contribute top-level entries that overwrite earlier ones.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration model, component port, errors
//! - **Service Layer** (`services`): the `ConfigManager` fold and built-in components
//! - **Infrastructure Layer** (`infrastructure`): settings, logging, document loading
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use confluent::{ComponentSlot, ConfigManager, Configuration, StaticComponent};
//!
//! let manager = ConfigManager::with_components(
//!     Configuration::new().with("x", 1),
//!     [ComponentSlot::shared(StaticComponent::new(
//!         "override",
//!         Configuration::new().with("x", 2),
//!     ))],
//! )?;
//!
//! assert_eq!(manager.configure_config()?, Configuration::new().with("x", 2));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::RegistryError;
pub use domain::models::{
    ComponentOutcome, ConfigPatch, Configuration, FoldReport, OutcomeState, SlotKind,
};
pub use domain::ports::{
    ComponentContext, ComponentFactory, ConfigComponent, ManagerView, TypeNamed,
};
pub use infrastructure::config::{ConfigError, ConfigLoader, Settings};
pub use services::{
    ComponentBinding, ComponentSlot, ConfigManager, EnableCondition, FnComponent, Gated,
    StaticComponent,
};
