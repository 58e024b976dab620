//! Implementation of the `confluent demo` command.
//!
//! Two components: the first contributes `foo = "bar"`, the second reads
//! `foo` and uses its value as a new key. Folding `{}` yields
//! `{"foo": "bar", "bar": "baz"}`.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

use crate::cli::commands::compose::ComposeOutput;
use crate::cli::output::output;
use crate::domain::models::{ConfigPatch, Configuration};
use crate::domain::ports::{ComponentContext, ConfigComponent};
use crate::infrastructure::config::Settings;
use crate::infrastructure::documents::parse_assignment;
use crate::services::{ComponentSlot, ConfigManager};

/// Arguments of `confluent demo`
#[derive(Args, Debug, Default)]
pub struct DemoArgs {
    /// Extra initial entries
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Contributes `foo = "bar"`
#[derive(Debug, Default)]
pub struct Component1;

impl ConfigComponent for Component1 {
    fn configure(&self, _config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        Ok(Configuration::new().with("foo", "bar"))
    }
}

/// Contributes `<value of foo> = "baz"`
#[derive(Debug, Default)]
pub struct Component2;

impl ConfigComponent for Component2 {
    fn configure(&self, config: &Configuration, _ctx: &ComponentContext<'_>) -> Result<ConfigPatch> {
        let key = config
            .get_str("foo")
            .context("Component2 requires a string value for 'foo'")?;
        Ok(Configuration::new().with(key, "baz"))
    }
}

/// The demo manager: `Component1` as a shared instance, `Component2` by type
pub fn demo_manager(initial: Configuration) -> Result<ConfigManager> {
    let first: Arc<dyn ConfigComponent> = Arc::new(Component1);
    let manager = ConfigManager::with_components(
        initial,
        [ComponentSlot::from_arc(first), ComponentSlot::of::<Component2>()],
    )?;
    Ok(manager)
}

/// Run the demo manager and print its report
pub fn execute(args: DemoArgs, settings: &Settings, json_mode: bool) -> Result<()> {
    let mut initial = Configuration::new();
    for raw in &args.assignments {
        let (key, value) = parse_assignment(raw)?;
        initial.insert(key, value);
    }

    let report = demo_manager(initial)?.fold()?;
    output(
        &ComposeOutput::new(report, settings.output.show_report),
        json_mode,
        settings.output.pretty_json,
    );
    Ok(())
}
