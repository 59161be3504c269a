// src/cli/handlers.rs
use crate::analysis::Engine;
use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::discovery;
use crate::exit::SondeExit;
use crate::reporting;
use crate::rules;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Handles the check command.
///
/// # Errors
/// Returns error if configuration, discovery or reporting fails.
pub fn handle_check(args: &CheckArgs) -> Result<SondeExit> {
    let config = load_config(args.config.as_deref())?;

    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let files = discovery::discover(&roots, &config)?;
    tracing::info!(files = files.len(), "scanning");

    let engine = Engine::new(config);
    let report = engine.scan(&files);
    reporting::print_report(&report, args.format)?;

    if report.has_errors() {
        Ok(SondeExit::CheckFailed)
    } else {
        Ok(SondeExit::Success)
    }
}

/// Handles the rules command: prints the catalogue with enabled state.
///
/// # Errors
/// Returns error if the configuration cannot be loaded.
pub fn handle_rules(config_path: Option<&Path>) -> Result<SondeExit> {
    let config = load_config(config_path)?;
    for info in rules::CATALOGUE {
        let state = if config.rules.is_enabled(info.id) {
            "on ".green()
        } else {
            "off".dimmed()
        };
        println!(
            "{state} {:<24} {:<6} {}",
            info.id.bold(),
            info.confidence.prefix(),
            info.title
        );
    }
    Ok(SondeExit::Success)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            Config::load_from(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Config::load()?),
    }
}
