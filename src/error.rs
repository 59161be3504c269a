// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SondeError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Unsupported language for {0}")]
    UnsupportedLanguage(PathBuf),

    #[error("Failed to parse {0}")]
    Parse(String),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SondeError>;

// Allow `?` on std::io::Error by converting to SondeError::Io with unknown path.
impl From<std::io::Error> for SondeError {
    fn from(source: std::io::Error) -> Self {
        SondeError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for SondeError {
    fn from(e: walkdir::Error) -> Self {
        SondeError::Other(e.to_string())
    }
}

/// Failure of a single rule predicate on a single node.
///
/// These never abort a run; the dispatcher records them next to the findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("too complex to analyze (depth limit {limit} exceeded)")]
    TooComplex { limit: usize },

    #[error("malformed tree: {0}")]
    Malformed(String),

    #[error("{0}")]
    Failed(String),
}
