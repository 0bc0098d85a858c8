//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// carthage-boost - build and install a Carthage patched for concurrent
/// dependency builds
#[derive(Parser, Debug)]
#[command(name = "carthage-boost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; defaults to running the full pipeline
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline: check, clone, checkout, patch, build, install
    Run(commands::run::RunArgs),

    /// Probe for the required git and make toolchains
    Check(commands::check::CheckArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        let color = self.color;
        match self.command {
            // Bare invocation runs the pipeline end-to-end with defaults.
            None => commands::run::execute(commands::run::RunArgs::default(), &color),
            Some(Commands::Run(args)) => commands::run::execute(args, &color),
            Some(Commands::Check(args)) => commands::check::execute(args, &color),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
        }
    }
}
