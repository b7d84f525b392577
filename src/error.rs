/// Error types.
///
/// `FormatError` is the only failure the analysis core can produce: it is
/// raised while turning level text into a grid. Everything after that is
/// total. `ProbeError` covers the outer layer (files, config, output).

use std::path::PathBuf;

use thiserror::Error;

/// Level text could not be turned into a rectangular grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("level text is empty")]
    Empty,

    #[error("level rows have zero width")]
    ZeroWidth,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level {}: {source}", .path.display())]
    Level {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("config error in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("json output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no level files found under {}", .0.display())]
    NoLevels(PathBuf),
}

pub type ProbeResult<T> = Result<T, ProbeError>;
