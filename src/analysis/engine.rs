//! Main execution logic for the `sonde` analysis engine.
//! Unified entry point for all scanning operations.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::config::Config;
use crate::lang::Lang;
use crate::rules;
use crate::types::{FileReport, ScanReport};

use super::dispatch::Registry;
use super::worker;

/// Label used for reports on in-memory buffers.
pub const MEMORY_PATH: &str = "<memory>";

/// Owns the configuration and the rule registry built from it. The registry
/// is shared read-only by every worker.
pub struct Engine {
    config: Config,
    registry: Registry,
}

impl Engine {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let registry = rules::registry(&config.rules);
        tracing::debug!(rules = registry.len(), "rule registry built");
        Self { config, registry }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Analyzes `files` in parallel. Report order follows `files`.
    #[must_use]
    pub fn scan(&self, files: &[PathBuf]) -> ScanReport {
        let start = Instant::now();

        let results: Vec<FileReport> = files
            .par_iter()
            .map(|path| worker::scan_file(path, &self.registry, &self.config.rules))
            .collect();

        ScanReport::from_files(results, start.elapsed().as_millis())
    }

    /// Analyzes an in-memory buffer.
    #[must_use]
    pub fn scan_source(&self, lang: Lang, source: &str) -> FileReport {
        worker::scan_source(
            Path::new(MEMORY_PATH),
            lang,
            source,
            &self.registry,
            &self.config.rules,
        )
    }
}
