//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Cli, Commands};
use super::handlers::{handle_check, handle_rules};
use crate::exit::SondeExit;
use anyhow::Result;

/// Executes the parsed command line. No subcommand means `check`.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(cli: Cli) -> Result<SondeExit> {
    match cli.command {
        Some(Commands::Check(args)) => handle_check(&args),
        Some(Commands::Rules { config }) => handle_rules(config.as_deref()),
        None => handle_check(&cli.check),
    }
}
