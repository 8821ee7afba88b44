//! Error types surfaced by the normalization engine.
//!
//! Every pass is all-or-nothing: the first error aborts normalization of the
//! whole document and no partially rewritten tree is considered valid.

mod constructors;
mod types;

pub use types::ConfigError;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests;
