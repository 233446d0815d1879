//! Mock backend errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("failed to read fixture file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture file {path:?}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("no estimates in fixture file {0:?}")]
    Empty(PathBuf),
}
