//! Result configuration helper elements.
//!
//! Paths are kept as written; the prefixes they use are declared on the root
//! element from the content's `namespaces` list.

use super::schema_order;
use super::xml_writer::XmlWriter;
use crate::error::{ConfigError, ConfigResult};
use crate::namespace::Namespaces;
use crate::normalize::canonical_enum;
use crate::rules::{DATA, NAME, NAMESPACES};
use crate::value::{Mapping, Path, Value};

const ROOT: &str = "resultConfigurationHelper";
const ELEMENT: &str = "element";
const TYPE: &str = "type";
const ELEMENT_ORDER: &[&str] = &["label", NAME, "path", TYPE];

pub(super) fn render(path: &Path, content: &Mapping, namespaces: &Namespaces) -> ConfigResult<String> {
    let xmlns = declarations(&path.key(NAMESPACES), content, namespaces)?;
    let attributes: Vec<(&str, &str)> = xmlns
        .iter()
        .map(|(attribute, uri)| (attribute.as_str(), uri.as_str()))
        .collect();

    let mut writer = XmlWriter::new();
    writer.open(ROOT, &attributes);
    for (name, definition) in elements(&path.key(DATA), content.get(DATA))? {
        let Some(fields) = definition.as_map() else {
            return Err(ConfigError::structure(
                path.key(DATA).key(name).to_string(),
                format!("expected an element definition, found a {}", definition.kind()),
            ));
        };
        let mut element = fields.clone();
        element.insert(NAME, Value::string(name));
        if let Some(kind) = fields.get(TYPE).and_then(Value::as_str) {
            element.insert(TYPE, Value::string(canonical_enum(kind)));
        }
        writer.open(ELEMENT, &[]);
        for (tag, value) in schema_order(&element, ELEMENT_ORDER) {
            match value.scalar_text() {
                Some(text) => writer.text_element(tag, &text),
                None => writer.empty_element(tag),
            }
        }
        writer.close(ELEMENT);
    }
    writer.close(ROOT);
    Ok(writer.finish())
}

/// `xmlns:<prefix>` attributes for the prefixes listed by the content.
fn declarations(
    path: &Path,
    content: &Mapping,
    namespaces: &Namespaces,
) -> ConfigResult<Vec<(String, String)>> {
    let prefixes = content
        .get(NAMESPACES)
        .and_then(Value::as_list)
        .unwrap_or_default();
    prefixes
        .iter()
        .filter_map(Value::scalar_text)
        .map(|prefix| -> ConfigResult<(String, String)> {
            let uri = namespaces.uri(&prefix).ok_or_else(|| {
                ConfigError::unresolved(
                    path.to_string(),
                    NAMESPACES,
                    format!("namespace prefix '{prefix}' is not declared"),
                )
            })?;
            Ok((format!("xmlns:{prefix}"), uri.to_owned()))
        })
        .collect()
}

/// Element definitions given as a map or as a list of single-entry maps.
fn elements<'a>(path: &Path, data: Option<&'a Value>) -> ConfigResult<Vec<(&'a str, &'a Value)>> {
    match data {
        None => Ok(Vec::new()),
        Some(Value::Map(map)) => Ok(map.iter().collect()),
        Some(Value::List(items)) => {
            let mut found = Vec::new();
            for (index, item) in items.iter().enumerate() {
                let Some(map) = item.as_map() else {
                    return Err(ConfigError::structure(
                        path.index(index).to_string(),
                        format!("expected an element definition, found a {}", item.kind()),
                    ));
                };
                found.extend(map.iter());
            }
            Ok(found)
        }
        Some(other) => Err(ConfigError::structure(
            path.to_string(),
            format!("expected element definitions, found a {}", other.kind()),
        )),
    }
}
