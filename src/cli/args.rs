use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::reporting::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "sonde",
    version,
    about = "Structural checks for Rust, Python and TypeScript sources",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Arguments for the default `check` command.
    #[command(flatten)]
    pub check: CheckArgs,
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan files and report rule violations (default)
    Check(CheckArgs),
    /// List the rule catalogue
    Rules {
        /// Read settings from FILE instead of ./sonde.toml
        #[arg(long, short, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Files or directories to scan [default: .]
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Read settings from FILE instead of ./sonde.toml
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_is_a_check_of_cwd() {
        let cli = Cli::try_parse_from(["sonde"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.check.paths.is_empty());
        assert_eq!(cli.check.format, OutputFormat::Text);
    }

    #[test]
    fn check_subcommand_with_options() {
        let cli = Cli::try_parse_from([
            "sonde", "check", "src", "lib", "--format", "json", "--config", "ci.toml", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Some(Commands::Check(args)) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("lib")]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("ci.toml")));
    }

    #[test]
    fn top_level_paths_without_subcommand() {
        let cli = Cli::try_parse_from(["sonde", "src/main.rs", "--format", "json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.check.paths, vec![PathBuf::from("src/main.rs")]);
        assert_eq!(cli.check.format, OutputFormat::Json);
    }

    #[test]
    fn rules_subcommand() {
        let cli = Cli::try_parse_from(["sonde", "rules"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Rules { config: None })));
    }
}
