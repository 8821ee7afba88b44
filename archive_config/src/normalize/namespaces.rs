//! Namespace rewriting.
//!
//! Resolves the prefixes declared in the top-level `namespaces` list for
//! schema entities, query texts and path expressions.

use tracing::trace;

use super::Context;
use crate::error::{ConfigError, ConfigResult};
use crate::namespace::Namespaces;
use crate::rules::{NAME, NAMESPACE, NAMESPACES, PATH_FIELDS, QUERY_FIELD, SCHEMA_ENTITIES, TEXT};
use crate::value::{Mapping, Path, Scalar, Value};

pub(super) fn apply(doc: &mut Value, _: &Context<'_>) -> ConfigResult<()> {
    let namespaces = Namespaces::from_document(doc)?;
    name_schema_entities(doc, &namespaces)?;
    declare_query_namespaces(doc, &namespaces)?;
    qualify_path_fields(doc, &namespaces)
}

/// A schema entity is named after the URI of its namespace.
fn name_schema_entities(doc: &mut Value, namespaces: &Namespaces) -> ConfigResult<()> {
    for path in doc.maps_matching(&SCHEMA_ENTITIES) {
        let Some(entity) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
            continue;
        };
        if entity.contains_key(NAME) {
            entity.remove(NAMESPACE);
            continue;
        }
        let Some(prefix) = entity.get(NAMESPACE).and_then(Value::as_str) else {
            continue;
        };
        let uri = namespaces
            .uri(prefix)
            .ok_or_else(|| unknown_prefix(&path, NAMESPACE, prefix))?
            .to_owned();
        trace!(%path, %uri, "naming schema entity after its namespace");
        entity.remove(NAMESPACE);
        entity.insert_first(NAME, Value::string(uri));
    }
    Ok(())
}

/// Collapses `{text, namespace | namespaces}` query maps into plain query
/// text preceded by the declarations of the non-default prefixes it uses.
fn declare_query_namespaces(doc: &mut Value, namespaces: &Namespaces) -> ConfigResult<()> {
    let queries = doc.paths_where(|path, node| {
        node.as_map().is_some_and(|query| query.contains_key(TEXT))
            && QUERY_FIELD.is_match(&path.to_string())
    });
    for path in queries {
        let Some(query) = doc.get(&path)?.and_then(Value::as_map) else {
            continue;
        };
        let text = query.get(TEXT).and_then(Value::scalar_text).unwrap_or_default();
        let mut preamble = String::new();
        for prefix in query_prefixes(query) {
            let namespace = namespaces
                .get(&prefix)
                .ok_or_else(|| unknown_prefix(&path, NAMESPACE, &prefix))?;
            if !namespace.is_default {
                preamble.push_str(&format!(
                    "declare namespace {prefix} = \"{}\";\n",
                    namespace.uri
                ));
            }
        }
        trace!(%path, "inlining query namespace declarations");
        doc.put(&path, Value::string(preamble + &text))?;
    }
    Ok(())
}

/// Prefixes named by `namespace` and `namespaces`, each once, in order of
/// first mention.
fn query_prefixes(query: &Mapping) -> Vec<String> {
    let single = query.get(NAMESPACE).and_then(Value::scalar_text);
    let listed = query
        .get(NAMESPACES)
        .and_then(Value::as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::scalar_text);
    single.into_iter().chain(listed).fold(Vec::new(), |mut prefixes, prefix| {
        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
        prefixes
    })
}

/// Rewrites path expressions into Clark notation.
fn qualify_path_fields(doc: &mut Value, namespaces: &Namespaces) -> ConfigResult<()> {
    if namespaces.is_empty() {
        return Ok(());
    }
    for pattern in PATH_FIELDS.iter() {
        for path in doc.paths_matching(pattern) {
            if let Some(Value::Scalar(Scalar::String(expression))) =
                doc.get_mut(&path)?
            {
                *expression = namespaces.to_clark(expression);
            }
        }
    }
    Ok(())
}

fn unknown_prefix(path: &Path, property: &str, prefix: &str) -> ConfigError {
    ConfigError::unresolved(
        path.to_string(),
        property,
        format!("namespace prefix '{prefix}' is not declared"),
    )
}
