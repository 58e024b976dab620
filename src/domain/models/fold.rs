//! Outcome records produced by a fold.

use serde::Serialize;

use super::configuration::Configuration;

/// How a component was registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// A fresh instance is built for every fold
    Factory,
    /// One instance is reused across folds
    Shared,
}

impl SlotKind {
    /// Lowercase label used in output
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Factory => "factory",
            Self::Shared => "shared",
        }
    }
}

/// Terminal state of one component within one fold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OutcomeState {
    /// `is_enabled` returned false; nothing was contributed
    Disabled,
    /// `configure` ran and its patch was merged
    Applied {
        /// Keys written by the patch, in patch order
        keys: Vec<String>,
    },
}

/// What happened to a single registered component during a fold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentOutcome {
    /// Registered component name
    pub name: String,
    /// Zero-based registration position
    pub position: usize,
    /// Registration form
    pub kind: SlotKind,
    /// What the component did
    #[serde(flatten)]
    pub state: OutcomeState,
}

impl ComponentOutcome {
    /// Whether the component ran and its patch was merged
    pub const fn is_applied(&self) -> bool {
        matches!(self.state, OutcomeState::Applied { .. })
    }

    /// Keys this component wrote, empty when disabled
    pub fn written_keys(&self) -> &[String] {
        match &self.state {
            OutcomeState::Applied { keys } => keys,
            OutcomeState::Disabled => &[],
        }
    }
}

/// Result of folding every registered component over the initial configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldReport {
    /// The fully folded configuration
    pub configuration: Configuration,
    /// One entry per registered component, in registration order
    pub outcomes: Vec<ComponentOutcome>,
}

impl FoldReport {
    /// Names of components that contributed, in application order
    pub fn applied(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_applied())
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Names of components that were skipped
    pub fn disabled(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_applied())
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Name of the last component that wrote `key`, if any did
    pub fn last_writer(&self, key: &str) -> Option<&str> {
        self.outcomes
            .iter()
            .rev()
            .find(|o| o.written_keys().iter().any(|k| k == key))
            .map(|o| o.name.as_str())
    }

    /// Drop the outcomes, keeping the configuration
    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }
}
