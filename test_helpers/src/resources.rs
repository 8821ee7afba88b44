//! Scratch directories holding named resources for resolver tests.

use std::fs;

use anyhow::{Context as _, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with resource files.
///
/// The directory is deleted when the value is dropped.
///
/// # Examples
///
/// ```
/// use test_helpers::resources::ResourceDir;
///
/// let dir = ResourceDir::new()?.with("pdi.yml", "data: []\n")?;
/// assert!(dir.root().join("pdi.yml").exists());
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct ResourceDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ResourceDir {
    /// Creates an empty scratch directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create resource directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Writes `text` to `name`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn with(self, name: &str, text: &str) -> Result<Self> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, text).with_context(|| format!("write {path}"))?;
        Ok(self)
    }

    /// The directory holding the resources.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
