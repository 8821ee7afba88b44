//! Primary error enum for configuration normalization.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while normalizing a configuration document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A path or shape assumption was violated, for example indexing into a
    /// scalar or finding a list where a map was expected.
    #[error("Invalid structure at '{path}': {message}")]
    Structure {
        /// Canonical path of the offending node.
        path: String,
        /// Human-readable explanation of the violated assumption.
        message: String,
    },

    /// A required reference could not be resolved to a unique default entity.
    #[error("Cannot resolve '{property}' at '{path}': {reason}")]
    UnresolvedReference {
        /// Canonical path of the entity missing the reference.
        path: String,
        /// Reference property that could not be filled in.
        property: String,
        /// Why no unique default entity was found.
        reason: String,
    },

    /// The resource resolver could not find a named external resource.
    #[error("Unknown resource '{name}'")]
    UnknownResource {
        /// Name of the resource as written in the configuration.
        name: String,
        /// Underlying lookup failure, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An ingest processor id has no registered class and name.
    #[error("Unknown ingest processor '{id}' at '{path}'")]
    UnknownProcessor {
        /// Canonical path of the processor descriptor.
        path: String,
        /// The unregistered processor id.
        id: String,
    },

    /// YAML text could not be parsed into a configuration tree.
    #[error("Failed to parse YAML: {source}")]
    Parse {
        /// Error reported by the YAML parser.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
