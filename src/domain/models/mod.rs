//! Domain models: the configuration mapping and fold reports

pub mod configuration;
pub mod fold;

pub use configuration::{ConfigPatch, Configuration};
pub use fold::{ComponentOutcome, FoldReport, OutcomeState, SlotKind};
