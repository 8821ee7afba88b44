//! Output writers for `archive-config`.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::CliError;

/// Writes `content` to `target`, or to standard output when there is none.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the destination cannot be written.
pub fn write(target: Option<&Utf8Path>, content: &str) -> Result<(), CliError> {
    match target {
        Some(path) => write_file(path, content),
        None => std::io::stdout()
            .lock()
            .write_all(content.as_bytes())
            .map_err(|source| CliError::Io {
                path: Utf8PathBuf::from("<stdout>"),
                source,
            }),
    }
}

fn write_file(path: &Utf8Path, content: &str) -> Result<(), CliError> {
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
    Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(io_error)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use camino::Utf8PathBuf;
    use test_helpers::resources::ResourceDir;

    use super::write;

    #[test]
    fn creates_missing_parent_directories() -> Result<()> {
        let scratch = ResourceDir::new()?;
        let target: Utf8PathBuf = scratch.root().join("out/normalized.json");
        write(Some(target.as_path()), "{}\n")?;
        assert_eq!(std::fs::read_to_string(&target)?, "{}\n");
        Ok(())
    }

    #[test]
    fn truncates_existing_files() -> Result<()> {
        let scratch = ResourceDir::new()?.with("normalized.json", "stale content that is longer")?;
        let target = scratch.root().join("normalized.json");
        write(Some(target.as_path()), "{}\n")?;
        assert_eq!(std::fs::read_to_string(&target)?, "{}\n");
        Ok(())
    }
}
