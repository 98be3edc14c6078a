mod cmd;
mod core;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Residential mortgage loan estimates: monthly payment, closing costs and
/// cash to close.
#[derive(Parser, Debug)]
#[command(name = "loanest", version, about)]
struct Cli {
    /// JSON engine configuration overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Itemized estimate for one scenario
    Estimate(cmd::estimate::EstimateCommand),
    /// One scenario priced side by side across loan programs
    Compare(cmd::compare::CompareCommand),
    /// Estimate every scenario in a CSV file
    Batch(cmd::batch::BatchCommand),
    /// List loan programs with their minimums, presets and ceilings
    Programs(cmd::programs::ProgramsCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = cmd::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Estimate(command) => command.exec(&config),
        Command::Compare(command) => command.exec(&config),
        Command::Batch(command) => command.exec(&config),
        Command::Programs(command) => command.exec(&config),
        Command::Schema(command) => command.exec(),
    }
}
