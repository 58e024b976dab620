//! Port trait definitions (Hexagonal Architecture)
//!
//! - `ConfigComponent`: a pluggable configuration contributor
//! - `ComponentFactory`: builds a fresh component for every fold
//!
//! Components receive a `ComponentContext` giving read-only access to the
//! manager that is folding them.

pub mod component;

pub use component::{
    short_type_name, ComponentContext, ComponentFactory, ConfigComponent, ManagerView, TypeNamed,
};
