//! Confluent CLI entry point.

use clap::Parser;

use confluent::cli::Cli;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = confluent::cli::run(cli) {
        confluent::cli::handle_error(err, json);
    }
}
