//! Index definitions.
//!
//! ```yaml
//! indexes:
//!   key:
//!     type: path.value.index
//!     path: /ri:ris/ri:ri[@key<STRING>]
//! ```
//!
//! Each definition becomes an element named after its type, carrying the
//! type's defaults, its name and its namespace-qualified path.

use super::schema_order;
use super::xml_writer::XmlWriter;
use crate::error::{ConfigError, ConfigResult};
use crate::namespace::Namespaces;
use crate::rules::NAME;
use crate::value::{Mapping, Path, Scalar, Value};

pub(super) const INDEXES: &str = "indexes";

const TYPE: &str = "type";
const PATH: &str = "path";
const PATH_VALUE_INDEX: &str = "path.value.index";
const FULL_TEXT_INDEX: &str = "full.text.index";

const PATH_VALUE_DEFAULTS: &[(&str, bool)] = &[
    ("build.without.logging", false),
    ("compressed", false),
    ("concurrent", false),
    ("unique.keys", true),
];

const FULL_TEXT_DEFAULTS: &[(&str, bool)] = &[
    ("build.without.logging", false),
    ("compressed", false),
    ("concurrent", false),
    ("convert.terms.to.lowercase", true),
    ("filter.english.stop.words", false),
    ("include.attributes", false),
    ("leading.wildcard", false),
    ("support.phrases", false),
    ("support.scoring", false),
    ("support.start.end.token.flags", false),
];

/// Element order shared by both index types.
const INDEX_ORDER: &[&str] = &[
    "build.without.logging",
    "compressed",
    "concurrent",
    "convert.terms.to.lowercase",
    "filter.english.stop.words",
    "include.attributes",
    "leading.wildcard",
    NAME,
    PATH,
    "support.phrases",
    "support.scoring",
    "support.start.end.token.flags",
    "unique.keys",
];

fn defaults_for(index_type: &str) -> &'static [(&'static str, bool)] {
    match index_type {
        PATH_VALUE_INDEX => PATH_VALUE_DEFAULTS,
        FULL_TEXT_INDEX => FULL_TEXT_DEFAULTS,
        _ => &[],
    }
}

/// Writes the `<indexes>` element for a map, a list of single-entry maps, or
/// null.
pub(super) fn write_indexes(
    writer: &mut XmlWriter,
    path: &Path,
    indexes: &Value,
    namespaces: &Namespaces,
) -> ConfigResult<()> {
    let definitions = definitions(path, indexes)?;
    if definitions.is_empty() {
        writer.empty_element(INDEXES);
        return Ok(());
    }
    writer.open(INDEXES, &[]);
    for (name, definition) in definitions {
        write_index(writer, &path.key(name), name, definition, namespaces)?;
    }
    writer.close(INDEXES);
    Ok(())
}

fn definitions<'a>(path: &Path, indexes: &'a Value) -> ConfigResult<Vec<(&'a str, &'a Value)>> {
    match indexes {
        Value::Scalar(Scalar::Null) => Ok(Vec::new()),
        Value::Map(map) => Ok(map.iter().collect()),
        Value::List(items) => {
            let mut found = Vec::new();
            for (index, item) in items.iter().enumerate() {
                let Some(map) = item.as_map() else {
                    return Err(ConfigError::structure(
                        path.index(index).to_string(),
                        format!("expected an index definition, found a {}", item.kind()),
                    ));
                };
                found.extend(map.iter());
            }
            Ok(found)
        }
        Value::Scalar(_) => Err(ConfigError::structure(
            path.to_string(),
            format!("expected index definitions, found a {}", indexes.kind()),
        )),
    }
}

fn write_index(
    writer: &mut XmlWriter,
    path: &Path,
    name: &str,
    definition: &Value,
    namespaces: &Namespaces,
) -> ConfigResult<()> {
    let empty = Mapping::new();
    let explicit = match definition {
        Value::Map(map) => map,
        Value::Scalar(Scalar::Null) => &empty,
        other => {
            return Err(ConfigError::structure(
                path.to_string(),
                format!("expected an index definition, found a {}", other.kind()),
            ));
        }
    };
    let index_type = explicit
        .get(TYPE)
        .and_then(Value::as_str)
        .unwrap_or(PATH_VALUE_INDEX);

    let mut fields: Mapping = defaults_for(index_type)
        .iter()
        .map(|&(key, flag)| (key, Value::from(flag)))
        .collect();
    fields.insert(NAME, Value::string(name));
    for (key, value) in explicit.iter().filter(|(key, _)| *key != TYPE) {
        let field = match (key, value) {
            (PATH, Value::Scalar(Scalar::String(expression))) => {
                Value::string(namespaces.to_clark(expression))
            }
            _ => value.clone(),
        };
        fields.insert(key, field);
    }

    writer.open(index_type, &[]);
    for (tag, value) in schema_order(&fields, INDEX_ORDER) {
        match value.scalar_text() {
            Some(text) => writer.text_element(tag, &text),
            None => writer.empty_element(tag),
        }
    }
    writer.close(index_type);
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rstest::rstest;

    use super::write_indexes;
    use crate::namespace::{Namespace, Namespaces};
    use crate::translate::xml_writer::XmlWriter;
    use crate::value::{Path, Value};
    use crate::yaml;

    fn render(source: &str) -> Result<String> {
        let namespaces = Namespaces::from(vec![Namespace {
            prefix: "n".into(),
            uri: "urn:x".into(),
            is_default: false,
        }]);
        let indexes = yaml::parse(source)?;
        let mut writer = XmlWriter::new();
        write_indexes(&mut writer, &Path::parse("/indexes"), &indexes, &namespaces)?;
        Ok(writer.finish())
    }

    #[test]
    fn path_value_index_carries_defaults_and_qualified_path() -> Result<()> {
        let xml = render("gnat:\n  type: path.value.index\n  path: /n:gnu/n:gnat\n")?;
        assert_eq!(
            xml,
            concat!(
                "<indexes>\n",
                "  <path.value.index>\n",
                "    <build.without.logging>false</build.without.logging>\n",
                "    <compressed>false</compressed>\n",
                "    <concurrent>false</concurrent>\n",
                "    <name>gnat</name>\n",
                "    <path>/{urn:x}gnu/{urn:x}gnat</path>\n",
                "    <unique.keys>true</unique.keys>\n",
                "  </path.value.index>\n",
                "</indexes>\n",
            )
        );
        Ok(())
    }

    #[test]
    fn full_text_index_has_its_own_defaults() -> Result<()> {
        let xml = render("- body:\n    type: full.text.index\n")?;
        anyhow::ensure!(xml.contains("<filter.english.stop.words>false</filter.english.stop.words>"));
        anyhow::ensure!(xml.contains("<convert.terms.to.lowercase>true</convert.terms.to.lowercase>"));
        anyhow::ensure!(!xml.contains("unique.keys"));
        Ok(())
    }

    #[rstest]
    #[case("compressed: true", "<compressed>true</compressed>")]
    #[case("unique.keys: false", "<unique.keys>false</unique.keys>")]
    fn explicit_values_override_defaults(#[case] field: &str, #[case] expected: &str) -> Result<()> {
        let xml = render(&format!("key:\n  path: /n:a\n  {field}\n"))?;
        anyhow::ensure!(xml.contains(expected), "missing {expected} in:\n{xml}");
        Ok(())
    }

    #[test]
    fn null_indexes_render_an_empty_element() -> Result<()> {
        let mut writer = XmlWriter::new();
        write_indexes(
            &mut writer,
            &Path::parse("/indexes"),
            &Value::null(),
            &Namespaces::default(),
        )?;
        anyhow::ensure!(writer.finish() == "<indexes/>\n");
        Ok(())
    }
}
