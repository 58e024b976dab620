//! Service layer: registration forms, built-in components and the manager

pub mod component_slot;
pub mod components;
pub mod config_manager;

pub use component_slot::{ComponentSlot, NamedFactory, ResolvedComponent, TypeFactory};
pub use components::{EnableCondition, FnComponent, Gated, StaticComponent};
pub use config_manager::{ComponentBinding, ConfigManager};
