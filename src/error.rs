use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edges of the engine: reading inputs, decoding declaration
/// groups, running jq filters, writing outputs. Synthesis itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid declaration group in {origin} at JSON path {path} → {message}")]
    Decode {
        origin: String,
        path: String,
        message: String,
    },
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error("jq filter failed:\n{0}")]
    Jq(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
