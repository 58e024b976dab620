//! Settings of the `confluent` binary

use serde::{Deserialize, Serialize};

use crate::infrastructure::logging::LogConfig;

/// Settings of the `confluent` binary itself
///
/// These control how the tool runs; they are unrelated to the configurations
/// the tool composes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Print the per-component fold report along with the configuration
    #[serde(default = "default_show_report")]
    pub show_report: bool,

    /// Indent JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

const fn default_show_report() -> bool {
    true
}

const fn default_pretty_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_report: default_show_report(),
            pretty_json: default_pretty_json(),
        }
    }
}
