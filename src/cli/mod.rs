//! Command-line interface for spin.
//!
//! This module handles CLI argument parsing and subcommand dispatch.
//! Authentication subcommands live in the [`auth`] submodule.

pub mod auth;

use auth::AuthCommands;
use clap::{Parser, Subcommand};

/// spin - command-line client configuration
#[derive(Parser, Debug)]
#[command(name = "spin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authentication related commands
    #[command(
        long_about = "Manage authentication configuration for spin.",
        after_help = auth::AUTH_EXAMPLE
    )]
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Auth { command } => auth::run(command),
    }
}

/// Parse CLI arguments, set up logging, and run the requested subcommand.
///
/// Returns the process exit code.
pub fn process_cli() -> i32 {
    let cli = Cli::parse();
    crate::debug::init_logging(cli.log_level.map(LogLevelArg::to_level_filter));

    match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("spin: error: {e:#}");
            1
        }
    }
}
