//! Normalization engine for archive server configuration documents.
//!
//! Authors write configuration loosely: singular entities instead of lists,
//! maps keyed by name, omitted references to the obvious default entity and
//! index or processor definitions in YAML. [`Normalizer`] rewrites such a
//! document into the fully expanded form the archive server accepts.
//!
//! ```
//! use archive_config::{Normalizer, Path, Value};
//!
//! let doc = Normalizer::new().normalize_yaml(
//!     "namespaces:\n  - prefix: n\n    uri: urn:x\nqueries:\n  - name: q\n    xdbPdiConfigs:\n      entityPath: /n:gnu/n:gnat\n",
//! )?;
//! let path = doc.find(&Path::parse("/queries/0/xdbPdiConfigs/entityPath"));
//! assert_eq!(path.and_then(Value::as_str), Some("/{urn:x}gnu/{urn:x}gnat"));
//! # Ok::<_, archive_config::ConfigError>(())
//! ```

mod error;
pub mod inflect;
pub mod namespace;
pub mod normalize;
pub mod resource;
pub mod rules;
mod translate;
mod value;
pub mod yaml;

pub use error::{ConfigError, ConfigResult};
pub use normalize::Normalizer;
pub use resource::{DirectoryResolver, InMemoryResolver, NoResources, ResourceResolver};
pub use value::{Mapping, Path, Scalar, Segment, Value};
