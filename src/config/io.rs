// src/config/io.rs
//! Reading `sonde.toml`.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SondeError};

use super::types::{Config, SondeToml};

pub const CONFIG_FILE: &str = "sonde.toml";

/// Parses toml text into a [`Config`], compiling path patterns.
///
/// # Errors
/// Returns [`SondeError::Config`] for invalid toml and
/// [`SondeError::Regex`] for invalid include/exclude patterns.
pub fn parse_toml(content: &str, origin: &Path) -> Result<Config> {
    let parsed: SondeToml = toml::from_str(content).map_err(|source| SondeError::Config {
        source,
        path: origin.to_path_buf(),
    })?;

    Ok(Config {
        include_patterns: compile_patterns(&parsed.include)?,
        exclude_patterns: compile_patterns(&parsed.exclude)?,
        rules: parsed.rules,
    })
}

/// Loads configuration from `path`. A missing file yields defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|source| SondeError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_toml(&content, path)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(SondeError::from))
        .collect()
}
