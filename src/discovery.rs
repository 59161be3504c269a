// src/discovery.rs
use crate::config::Config;
use crate::error::{Result, SondeError};
use crate::lang::Lang;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into.
pub const PRUNED_DIRS: &[&str] = &[
    "target",
    ".git",
    "node_modules",
    "__pycache__",
    "dist",
    "build",
    ".venv",
];

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNED_DIRS.contains(&name)
}

/// Collects analyzable files under `roots`, sorted and deduplicated.
///
/// A root may be a file or a directory. Entries the walk cannot read are
/// skipped and logged.
///
/// # Errors
/// Returns [`SondeError::Io`] if a root does not exist.
pub fn discover(roots: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if !root.exists() {
            return Err(SondeError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
                path: root.clone(),
            });
        }
        files.extend(walk(root));
    }

    let mut files = filter_config(files, config);
    files.sort();
    files.dedup();
    tracing::debug!(files = files.len(), "discovery finished");
    Ok(files)
}

fn walk(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
                    let p = entry.path().strip_prefix(".").unwrap_or(entry.path());
                    paths.push(p.to_path_buf());
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "walk error");
                errors += 1;
            }
        }
    }
    if errors > 0 {
        tracing::warn!(root = %root.display(), errors, "entries skipped during file walk");
    }
    paths
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn filter_config(mut paths: Vec<PathBuf>, config: &Config) -> Vec<PathBuf> {
    if !config.include_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            config.include_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    if !config.exclude_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            !config.exclude_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    paths
}
