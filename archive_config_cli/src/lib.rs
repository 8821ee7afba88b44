//! Library side of the `archive-config` command.
//!
//! Reads a YAML configuration document, normalizes it with resources resolved
//! from a directory and renders the result as JSON.

pub mod cli;
pub mod error;
pub mod output;

use archive_config::{DirectoryResolver, Normalizer, Value};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::info;

use crate::cli::Args;
use crate::error::CliError;

/// Normalizes the document named by `args` and returns it as pretty JSON.
///
/// # Errors
///
/// Returns [`CliError`] when the input cannot be read, the resource directory
/// cannot be opened or normalization fails.
pub fn run(args: &Args) -> Result<String, CliError> {
    let text = read_input(&args.input)?;
    let resources = DirectoryResolver::open(args.resource_root())?;
    info!(input = %args.input, resources = %resources.root(), "normalizing configuration");
    let doc = Normalizer::new().with_resolver(resources).normalize_yaml(&text)?;
    render(&doc)
}

/// Renders a normalized document as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`CliError::Json`] when serialization fails.
pub fn render(doc: &Value) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    Ok(json)
}

fn read_input(path: &Utf8Path) -> Result<String, CliError> {
    let Some(file_name) = path.file_name() else {
        return Err(CliError::InvalidInput(path.to_path_buf()));
    };
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}
