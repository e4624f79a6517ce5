//! `spin auth` subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;
use spin_config::{ConfigCookieWriter, StatusSink};

pub const AUTH_EXAMPLE: &str = "Example:\n  spin auth cookie \"SESSION=abcd1234\"";

const COOKIE_LONG: &str = "Store a raw Cookie header value (e.g. 'SESSION=abcd1234') in \
    ~/.spin/config so that all subsequent spin commands include it automatically.";

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AuthCommands {
    /// Store a session cookie in the spin configuration
    #[command(long_about = COOKIE_LONG, after_help = AUTH_EXAMPLE)]
    Cookie {
        /// Raw Cookie header value
        #[arg(value_name = "COOKIE_STRING")]
        cookie: String,
    },
}

/// Prints status messages to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn info(&self, message: &str) {
        println!("{message}");
    }
}

pub fn run(command: AuthCommands) -> Result<()> {
    match command {
        AuthCommands::Cookie { cookie } => set_cookie_cli(&cookie),
    }
}

/// Store `cookie` in `~/.spin/config`, reporting the path on stdout.
fn set_cookie_cli(cookie: &str) -> Result<()> {
    let status = ConsoleStatus;
    ConfigCookieWriter::new()
        .with_status(&status)
        .set_cookie(cookie)
        .context("failed to store session cookie")?;
    Ok(())
}
