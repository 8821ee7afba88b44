//! The normalization pipeline.
//!
//! A [`Normalizer`] rewrites a loosely authored configuration document into
//! the fully expanded, cross-referenced form the archive server accepts. The
//! passes run in a fixed order, each one a full traversal that mutates the
//! tree in place before the next starts:
//!
//! 1. document defaults (`version`)
//! 2. structural normalization (singular → plural, map-of-maps → list)
//! 3. inlining of external content
//! 4. enum canonicalization
//! 5. default values
//! 6. default references
//! 7. namespace rewriting
//! 8. translation of embedded `yaml` content into XML
//!
//! Normalization is all or nothing: on error the tree must be discarded.

mod defaults;
mod enums;
mod inline;
mod namespaces;
mod references;
mod structure;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::inflect::{English, Inflector};
use crate::resource::{NoResources, ResourceResolver};
use crate::translate;
use crate::value::{Mapping, Value};
use crate::yaml;

pub use enums::canonical_enum;

/// Collaborators shared by the passes of one run.
pub(crate) struct Context<'a> {
    pub(crate) inflector: &'a dyn Inflector,
    pub(crate) resolver: &'a dyn ResourceResolver,
}

type Pass = fn(&mut Value, &Context<'_>) -> ConfigResult<()>;

const PASSES: &[(&str, Pass)] = &[
    ("document defaults", defaults::apply_document_defaults),
    ("structure", structure::apply),
    ("inline content", inline::apply),
    ("enums", enums::apply),
    ("default values", defaults::apply),
    ("default references", references::apply),
    ("namespaces", namespaces::apply),
    ("embedded content", translate::apply),
];

/// Configuration normalization engine.
///
/// # Examples
///
/// ```
/// use archive_config::{Normalizer, Path, Value};
///
/// let doc = Normalizer::new().normalize_yaml(
///     "tenant:\n  name: INFOARCHIVE\napplication:\n  name: PhoneCalls\n  type: active archiving\n",
/// )?;
/// let app = |key: &str| doc.find(&Path::parse("/applications/0").key(key)).and_then(Value::as_str);
/// assert_eq!(app("tenant"), Some("INFOARCHIVE"));
/// assert_eq!(app("type"), Some("ACTIVE_ARCHIVING"));
/// # Ok::<_, archive_config::ConfigError>(())
/// ```
pub struct Normalizer {
    resolver: Box<dyn ResourceResolver>,
    inflector: Box<dyn Inflector>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    /// A normalizer that allows no external resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: Box::new(NoResources),
            inflector: Box::new(English),
        }
    }

    /// Resolve external content through `resolver`.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ResourceResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Name collections with `inflector` instead of the English suffix rules.
    #[must_use]
    pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Box::new(inflector);
        self
    }

    /// Normalizes `doc` in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by any pass. The document is
    /// left partially rewritten and must not be used.
    pub fn normalize(&self, doc: &mut Value) -> ConfigResult<()> {
        if doc.as_map().is_none() {
            return Err(ConfigError::structure(
                "/",
                format!("expected a map at the document root, found a {}", doc.kind()),
            ));
        }
        let context = Context {
            inflector: self.inflector.as_ref(),
            resolver: self.resolver.as_ref(),
        };
        for (name, pass) in PASSES {
            debug!(pass = *name, "running normalization pass");
            pass(doc, &context)?;
        }
        Ok(())
    }

    /// Parses YAML text and normalizes the resulting document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and any error raised
    /// by [`Normalizer::normalize`].
    pub fn normalize_yaml(&self, text: &str) -> ConfigResult<Value> {
        let mut doc = yaml::parse(text)?;
        self.normalize(&mut doc)?;
        Ok(doc)
    }
}

/// Borrows the top-level mapping of a document whose root shape was checked.
pub(crate) fn root_map(doc: &mut Value) -> ConfigResult<&mut Mapping> {
    let kind = doc.kind();
    doc.as_map_mut().ok_or_else(|| {
        ConfigError::structure("/", format!("expected a map at the document root, found a {kind}"))
    })
}
