//! Registry error types

use thiserror::Error;

/// Errors raised by the component registry of a
/// [`ConfigManager`](crate::services::ConfigManager).
///
/// Errors returned by components themselves are not represented here; they
/// pass through the fold untouched as `anyhow::Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A component with this name is already registered
    #[error("Duplicate '{name}' ConfigComponent")]
    DuplicateComponent {
        /// The colliding name
        name: String,
    },

    /// No component with this name is registered
    #[error("Component '{name}' is not registered with this manager")]
    UnboundComponent {
        /// The requested name
        name: String,
    },
}

impl RegistryError {
    /// Name of the component the error refers to
    pub fn component_name(&self) -> &str {
        match self {
            Self::DuplicateComponent { name } | Self::UnboundComponent { name } => name,
        }
    }
}
