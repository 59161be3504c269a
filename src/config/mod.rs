// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{ClassificationConfig, Config, RuleConfig, SondeToml};

use crate::error::Result;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `sonde.toml` from the working directory, if present.
    ///
    /// # Errors
    /// Returns error if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        io::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    /// Returns error if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Parses configuration from toml text.
    ///
    /// # Errors
    /// Returns error on invalid toml or regex patterns.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content, Path::new("<inline>"))
    }
}
