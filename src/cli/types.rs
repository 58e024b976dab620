//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::compose::ComposeArgs;
use crate::cli::commands::demo::DemoArgs;

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "confluent")]
#[command(about = "Confluent - layered configuration composition", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Settings file (defaults to .confluent/config.yaml and .confluent/local.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the built-in two-component example
    Demo(DemoArgs),

    /// Compose a configuration from files and assignments
    Compose(ComposeArgs),
}
