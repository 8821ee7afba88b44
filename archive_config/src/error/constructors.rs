//! Constructors for `ConfigError`.

use super::ConfigError;

impl ConfigError {
    /// Construct a [`ConfigError::Structure`] for the node at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::ConfigError;
    /// let err = ConfigError::structure("/holdings/0", "expected a map");
    /// assert!(matches!(err, ConfigError::Structure { .. }));
    /// ```
    #[must_use]
    pub fn structure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Construct a [`ConfigError::UnresolvedReference`].
    #[must_use]
    pub fn unresolved(
        path: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            path: path.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`ConfigError::UnknownResource`] without an underlying cause.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::ConfigError;
    /// let err = ConfigError::unknown_resource("pdi-schema.xsd");
    /// assert_eq!(err.to_string(), "Unknown resource 'pdi-schema.xsd'");
    /// ```
    #[must_use]
    pub fn unknown_resource(name: impl Into<String>) -> Self {
        Self::UnknownResource {
            name: name.into(),
            source: None,
        }
    }

    /// Construct a [`ConfigError::UnknownResource`] caused by `source`.
    #[must_use]
    pub fn unknown_resource_caused_by(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::UnknownResource {
            name: name.into(),
            source: Some(source.into()),
        }
    }

    /// Construct a [`ConfigError::UnknownProcessor`].
    #[must_use]
    pub fn unknown_processor(path: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownProcessor {
            path: path.into(),
            id: id.into(),
        }
    }

    /// Construct a [`ConfigError::Parse`] from a parser error.
    #[must_use]
    pub fn parse(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Parse {
            source: source.into(),
        }
    }
}
