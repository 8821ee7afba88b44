//! Error types for `archive-config`.

use archive_config::ConfigError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `archive-config` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Normalization failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The normalized document could not be serialized.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input path has no file name component.
    #[error("input path '{0}' does not name a file")]
    InvalidInput(Utf8PathBuf),

    /// Reading the input or writing the output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File the operation targeted.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
