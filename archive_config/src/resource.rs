//! Resolution of external resources referenced from content blocks.
//!
//! A content block may point at an external file (`content: {resource: ...}`)
//! instead of carrying its text inline. The engine asks a [`ResourceResolver`]
//! for the text; fetch failures are never retried here.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::{ConfigError, ConfigResult};

/// Maps a resource name to its text content.
///
/// Resolvers are shared by reference across normalization runs, so they must
/// be thread safe.
pub trait ResourceResolver: Send + Sync {
    /// Returns the text of the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] when the resource cannot be found.
    fn resolve(&self, name: &str) -> ConfigResult<String>;
}

/// Resolver that knows no resources: every lookup fails.
///
/// Use it to forbid external resources altogether.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn resolve(&self, name: &str) -> ConfigResult<String> {
        Err(ConfigError::unknown_resource(name))
    }
}

/// Any closure returning `Some(text)` for known names is a resolver.
impl<F> ResourceResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, name: &str) -> ConfigResult<String> {
        self(name).ok_or_else(|| ConfigError::unknown_resource(name))
    }
}

/// Resolver backed by an in-memory table of named texts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    resources: HashMap<String, String>,
}

impl InMemoryResolver {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` under `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.resources.insert(name.into(), text.into());
        self
    }
}

impl ResourceResolver for InMemoryResolver {
    fn resolve(&self, name: &str) -> ConfigResult<String> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::unknown_resource(name))
    }
}

/// Resolver reading resources relative to a root directory.
///
/// Lookups go through a capability handle on the root, so names cannot reach
/// files outside it (`../secret` fails like any missing resource).
#[derive(Debug)]
pub struct DirectoryResolver {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirectoryResolver {
    /// Opens `root` for resource lookups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the directory cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> ConfigResult<Self> {
        let path = root.as_ref();
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            root: path.to_path_buf(),
            dir,
        })
    }

    /// The directory resources are resolved against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, name: &str) -> ConfigResult<String> {
        let relative = name.trim_start_matches('/');
        tracing::debug!(root = %self.root, resource = relative, "reading resource");
        self.dir
            .read_to_string(relative)
            .map_err(|err| ConfigError::unknown_resource_caused_by(name, err))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use camino::Utf8PathBuf;

    use super::{DirectoryResolver, InMemoryResolver, NoResources, ResourceResolver};
    use crate::ConfigError;

    #[test]
    fn no_resources_always_fails() {
        let err = NoResources.resolve("pdi-schema.xsd");
        assert!(matches!(err, Err(ConfigError::UnknownResource { ref name, .. }) if name == "pdi-schema.xsd"));
    }

    #[test]
    fn closures_resolve_known_names() -> Result<()> {
        let resolver = |name: &str| (name == "a.txt").then(|| "alpha".to_owned());
        ensure!(resolver.resolve("a.txt")? == "alpha");
        ensure!(resolver.resolve("b.txt").is_err());
        Ok(())
    }

    #[test]
    fn in_memory_table_lookups() -> Result<()> {
        let resolver = InMemoryResolver::new().with("ingest.yml", "processors: []");
        ensure!(resolver.resolve("ingest.yml")? == "processors: []");
        ensure!(matches!(
            resolver.resolve("missing.yml"),
            Err(ConfigError::UnknownResource { .. })
        ));
        Ok(())
    }

    #[test]
    fn directory_resolver_reads_files_below_the_root() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir {}", path.display()))?;
        std::fs::create_dir_all(root.join("schemas"))?;
        std::fs::write(root.join("schemas/pdi.xsd"), "<xs:schema/>")?;

        let resolver = DirectoryResolver::open(&root)?;
        ensure!(resolver.resolve("schemas/pdi.xsd")? == "<xs:schema/>");
        ensure!(resolver.resolve("/schemas/pdi.xsd")? == "<xs:schema/>");
        ensure!(matches!(
            resolver.resolve("../outside.txt"),
            Err(ConfigError::UnknownResource { .. })
        ));
        Ok(())
    }

    #[test]
    fn directory_resolver_requires_an_existing_root() {
        let err = DirectoryResolver::open("/definitely/not/a/real/root");
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
