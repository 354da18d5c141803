//! Error taxonomy shared across the library surface.
//!
//! Every fallible operation returns one of these kinds. There is no local
//! recovery: a failed call aborts, and the handles it was invoked on stay
//! valid and reusable.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by game handles and database operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied value was rejected before any I/O happened:
    /// an empty path, a path that is not a directory, an empty plugin name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A metadata list or condition string could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A masterlist remote could not be reached or read.
    #[error("network error: {0}")]
    Network(String),

    /// The requested metadata does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse_in(origin: impl AsRef<std::path::Path>, source: serde_yaml::Error) -> Self {
        Error::Parse(format!("{}: {source}", origin.as_ref().display()))
    }
}
