//! Namespace declarations and Clark-notation rewriting.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{ConfigError, ConfigResult};
use crate::rules::{DEFAULT, NAMESPACES, compile};
use crate::value::{Path, Value};

/// Qualified-name prefix followed by the first character of the local part.
static QNAME: LazyLock<Regex> = LazyLock::new(|| compile(r"([A-Za-z_][\w.\-]*):([A-Za-z_*])"));

/// One `prefix → uri` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix used in path and query expressions.
    pub prefix: String,
    /// Namespace URI.
    pub uri: String,
    /// Whether this is the document's default namespace.
    pub is_default: bool,
}

/// The namespaces declared by a document, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    declared: Vec<Namespace>,
}

impl Namespaces {
    /// Reads the top-level `namespaces` list of `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Structure`] when the list or one of its entries
    /// is malformed.
    pub fn from_document(doc: &Value) -> ConfigResult<Self> {
        let path = Path::root().key(NAMESPACES);
        let Some(node) = doc.get(&path)? else {
            return Ok(Self::default());
        };
        let Some(items) = node.as_list() else {
            return Err(ConfigError::structure(
                path.to_string(),
                format!("expected a list of namespaces, found a {}", node.kind()),
            ));
        };
        let declared = items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_declaration(&path.index(index), item))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { declared })
    }

    /// Looks up the declaration for `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&Namespace> {
        self.declared.iter().find(|ns| ns.prefix == prefix)
    }

    /// URI declared for `prefix`.
    #[must_use]
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.get(prefix).map(|ns| ns.uri.as_str())
    }

    /// Returns `true` when the document declares no namespaces.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Rewrites every `prefix:local` token with a declared prefix into
    /// `{uri}local`. Text already inside braces is left alone, so rewriting is
    /// idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::namespace::{Namespace, Namespaces};
    ///
    /// let namespaces = Namespaces::from(vec![Namespace {
    ///     prefix: "n".into(),
    ///     uri: "urn:x".into(),
    ///     is_default: false,
    /// }]);
    /// assert_eq!(namespaces.to_clark("/n:gnu/n:gnat"), "/{urn:x}gnu/{urn:x}gnat");
    /// assert_eq!(namespaces.to_clark("/{urn:x}gnu/m:gnat"), "/{urn:x}gnu/m:gnat");
    /// ```
    #[must_use]
    pub fn to_clark(&self, expression: &str) -> String {
        let mut out = String::with_capacity(expression.len());
        let mut rest = expression;
        while let Some(open) = rest.find('{') {
            let (plain, braced) = rest.split_at(open);
            out.push_str(&self.rewrite_plain(plain));
            if let Some(close) = braced.find('}') {
                let (qualified, tail) = braced.split_at(close + 1);
                out.push_str(qualified);
                rest = tail;
            } else {
                out.push_str(braced);
                rest = "";
            }
        }
        out.push_str(&self.rewrite_plain(rest));
        out
    }

    fn rewrite_plain<'a>(&self, text: &'a str) -> Cow<'a, str> {
        QNAME.replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let first = caps.get(2).map_or("", |m| m.as_str());
            self.uri(prefix)
                .map_or_else(|| whole.to_owned(), |uri| format!("{{{uri}}}{first}"))
        })
    }
}

impl From<Vec<Namespace>> for Namespaces {
    fn from(declared: Vec<Namespace>) -> Self {
        Self { declared }
    }
}

fn parse_declaration(path: &Path, item: &Value) -> ConfigResult<Namespace> {
    let Some(map) = item.as_map() else {
        return Err(ConfigError::structure(
            path.to_string(),
            format!("expected a namespace declaration, found a {}", item.kind()),
        ));
    };
    let text = |key: &str| {
        map.get(key).and_then(Value::scalar_text).ok_or_else(|| {
            ConfigError::structure(path.to_string(), format!("namespace declaration lacks '{key}'"))
        })
    };
    Ok(Namespace {
        prefix: text("prefix")?,
        uri: text("uri")?,
        is_default: map.get(DEFAULT).and_then(Value::as_bool).unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rstest::rstest;

    use super::{Namespace, Namespaces};
    use crate::{ConfigError, yaml};

    fn phone_calls() -> Namespaces {
        Namespaces::from(vec![
            Namespace {
                prefix: "n".into(),
                uri: "urn:x".into(),
                is_default: false,
            },
            Namespace {
                prefix: "ri".into(),
                uri: "urn:x-emc:ia:schema:ri".into(),
                is_default: false,
            },
        ])
    }

    #[rstest]
    #[case("/n:gnu/n:gnat", "/{urn:x}gnu/{urn:x}gnat")]
    #[case("/n:foo/n:bar[n:baz]", "/{urn:x}foo/{urn:x}bar[{urn:x}baz]")]
    #[case(
        "/ri:ris/ri:ri[@key<STRING>]",
        "/{urn:x-emc:ia:schema:ri}ris/{urn:x-emc:ia:schema:ri}ri[@key<STRING>]"
    )]
    #[case("/other:foo/n:bar", "/other:foo/{urn:x}bar")]
    #[case("/{urn:x}gnu/{urn:x}gnat", "/{urn:x}gnu/{urn:x}gnat")]
    #[case("no prefixes here", "no prefixes here")]
    fn rewrites_declared_prefixes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(phone_calls().to_clark(input), expected);
    }

    #[test]
    fn reads_declarations_from_the_document() -> Result<()> {
        let doc = yaml::parse(
            "namespaces:\n  - prefix: n\n    uri: urn:x\n    default: true\n  - prefix: pdi\n    uri: urn:y\n",
        )?;
        let namespaces = Namespaces::from_document(&doc)?;
        anyhow::ensure!(namespaces.get("n").is_some_and(|ns| ns.is_default));
        anyhow::ensure!(namespaces.uri("pdi") == Some("urn:y"));
        Ok(())
    }

    #[test]
    fn rejects_declarations_without_uri() -> Result<()> {
        let doc = yaml::parse("namespaces:\n  - prefix: n\n")?;
        let err = Namespaces::from_document(&doc);
        anyhow::ensure!(matches!(err, Err(ConfigError::Structure { .. })));
        Ok(())
    }
}
