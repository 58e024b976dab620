//! Implementation of the `confluent compose` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{ComponentOutcome, Configuration, FoldReport, OutcomeState};
use crate::infrastructure::config::Settings;
use crate::infrastructure::documents::{layer_name, parse_assignment, read_document};
use crate::services::{ComponentSlot, ConfigManager, EnableCondition, Gated, StaticComponent};

/// Arguments of `confluent compose`
#[derive(Args, Debug, Default)]
pub struct ComposeArgs {
    /// Initial configuration (YAML or JSON mapping)
    #[arg(long, short, value_name = "FILE")]
    pub initial: Option<PathBuf>,

    /// Layer file applied in order; named after its file stem
    #[arg(long = "layer", short = 'l', value_name = "FILE")]
    pub layers: Vec<PathBuf>,

    /// Assignment applied after all layers
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Only apply layers while KEY is present in the working configuration
    #[arg(long, value_name = "KEY")]
    pub when: Option<String>,

    /// Omit the per-component report
    #[arg(long)]
    pub no_report: bool,
}

/// Composed configuration plus, optionally, what each component did
#[derive(Debug, Serialize)]
pub struct ComposeOutput {
    /// Folded configuration
    pub configuration: Configuration,
    /// Per-component outcomes, when the report is shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentOutcome>>,
}

impl ComposeOutput {
    /// Output for `report`, with or without its outcomes
    pub fn new(report: FoldReport, show_report: bool) -> Self {
        Self {
            configuration: report.configuration,
            components: show_report.then_some(report.outcomes),
        }
    }
}

impl CommandOutput for ComposeOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![serde_json::to_string_pretty(&self.configuration).unwrap_or_default()];

        if let Some(ref outcomes) = self.components {
            if !outcomes.is_empty() {
                lines.push("\nComponents:".to_string());
            }
            for outcome in outcomes {
                let line = match &outcome.state {
                    OutcomeState::Applied { keys } => format!(
                        "  {:>2}. {} ({}) applied: {}",
                        outcome.position + 1,
                        outcome.name,
                        outcome.kind.as_str(),
                        if keys.is_empty() { "-".to_string() } else { keys.join(", ") }
                    ),
                    OutcomeState::Disabled => format!(
                        "  {:>2}. {} ({}) skipped",
                        outcome.position + 1,
                        outcome.name,
                        outcome.kind.as_str()
                    ),
                };
                lines.push(line);
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        if self.components.is_some() {
            serde_json::to_value(self).unwrap_or_default()
        } else {
            serde_json::Value::from(self.configuration.clone())
        }
    }
}

/// Register the initial document, layers and assignments on a new manager
pub fn build_manager(args: &ComposeArgs) -> Result<ConfigManager> {
    let initial = match args.initial {
        Some(ref path) => read_document(path)?,
        None => Configuration::new(),
    };

    let mut manager = ConfigManager::new(initial);
    let condition = args
        .when
        .clone()
        .map_or(EnableCondition::Always, EnableCondition::key_present);

    for path in &args.layers {
        let layer = StaticComponent::new(layer_name(path), read_document(path)?);
        manager
            .add_component(ComponentSlot::shared(Gated::new(layer, condition.clone())))
            .with_context(|| format!("Cannot register layer {}", path.display()))?;
    }

    for raw in &args.assignments {
        let (key, value) = parse_assignment(raw)?;
        let component =
            StaticComponent::new(format!("set:{key}"), Configuration::new().with(key, value));
        manager.add_component(ComponentSlot::shared(component))?;
    }

    Ok(manager)
}

/// Compose and print a configuration
pub fn execute(args: ComposeArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let manager = build_manager(&args)?;
    let report = manager.fold()?;

    let show_report = settings.output.show_report && !args.no_report;
    output(
        &ComposeOutput::new(report, show_report),
        json_mode,
        settings.output.pretty_json,
    );
    Ok(())
}
