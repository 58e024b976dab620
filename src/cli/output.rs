//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Result of a command, printable for humans or as JSON
pub trait CommandOutput: Serialize {
    /// Plain-text rendering
    fn to_human(&self) -> String;
    /// JSON rendering
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result to stdout
pub fn output<T: CommandOutput>(result: &T, json_mode: bool, pretty: bool) {
    if json_mode {
        let value = result.to_json();
        let rendered = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        println!("{}", rendered.unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
