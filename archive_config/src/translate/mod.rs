//! Translation of embedded `yaml` content into XML.
//!
//! Content blocks whose location has a known grammar are rendered into an
//! XML document stored under `text`, and their `format` becomes `xml`.
//! Elements are written in schema order rather than source order.

mod data;
mod indexes;
mod ingest;
mod pdi;
mod result_helper;
mod xml_writer;

use tracing::{debug, warn};

use crate::error::ConfigResult;
use crate::namespace::Namespaces;
use crate::normalize::Context;
use crate::rules::{CONTENT, CONTENT_GRAMMARS, DATA, FORMAT, Grammar, NAMESPACES, TEXT};
use crate::value::{Mapping, Segment, Value};

/// Payload keys consumed by translation.
const PAYLOAD_KEYS: &[&str] = &[DATA, ingest::PROCESSORS, NAMESPACES];

pub(crate) fn apply(doc: &mut Value, _: &Context<'_>) -> ConfigResult<()> {
    let namespaces = Namespaces::from_document(doc)?;
    for (pattern, grammar) in CONTENT_GRAMMARS.iter() {
        for path in doc.maps_matching(pattern) {
            let Some(content) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
                continue;
            };
            if !is_yaml(content) {
                continue;
            }
            debug!(%path, ?grammar, "translating embedded content to XML");
            let xml = match grammar {
                Grammar::Pdi => pdi::render(&path, content, &namespaces)?,
                Grammar::Ingest => ingest::render(&path, content, &namespaces)?,
                Grammar::ResultHelper => result_helper::render(&path, content, &namespaces)?,
            };
            for key in PAYLOAD_KEYS {
                content.remove(key);
            }
            content.insert(FORMAT, Value::string("xml"));
            content.insert(TEXT, Value::string(xml));
        }
    }
    for path in doc.paths_where(|path, node| {
        matches!(path.last(), Some(Segment::Key(key)) if key == CONTENT)
            && node.as_map().is_some_and(is_yaml)
    }) {
        warn!(%path, "embedded yaml content has no known grammar; leaving it untranslated");
    }
    Ok(())
}

fn is_yaml(content: &Mapping) -> bool {
    content
        .get(FORMAT)
        .and_then(Value::as_str)
        .is_some_and(|format| matches!(format, "yaml" | "yml"))
}

/// Orders `fields` by their position in the element's schema `order`; fields
/// the schema does not list follow alphabetically.
pub(super) fn schema_order<'a>(fields: &'a Mapping, order: &[&str]) -> Vec<(&'a str, &'a Value)> {
    let mut ordered: Vec<_> = fields.iter().collect();
    ordered.sort_by_key(|(tag, _)| {
        let rank = order.iter().position(|known| known == tag).unwrap_or(usize::MAX);
        (rank, *tag)
    });
    ordered
}

#[cfg(test)]
mod tests;
