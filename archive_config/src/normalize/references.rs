//! Insertion of default cross-references.
//!
//! An entity that omits a reference implied by [`REFERENCE_RULES`] refers to
//! the default entity of the referenced type: the one flagged `default: true`,
//! or the only one there is.

use tracing::{debug, trace};

use super::Context;
use crate::error::{ConfigError, ConfigResult};
use crate::rules::{
    DEFAULT, NAME, NAMESPACE, NAMESPACES, REFERENCE_RULES, SCHEMA_ENTITY_PREFIX,
    identifier_property, reference_type,
};
use crate::value::{Mapping, Path, Value};

pub(super) fn apply(doc: &mut Value, context: &Context<'_>) -> ConfigResult<()> {
    for rule in REFERENCE_RULES.iter() {
        for path in doc.maps_matching(&rule.pattern) {
            for &property in rule.properties {
                let Some(entity) = doc.find(&path).and_then(Value::as_map) else {
                    continue;
                };
                if !misses_property(&path, entity, property) {
                    continue;
                }
                let collection = context.inflector.plural(reference_type(property));
                let Some(target) = default_entity(doc, &path, property, &collection)? else {
                    continue;
                };
                trace!(%path, property, %target, "inserting default reference");
                if let Some(owner) = doc.get_mut(&path)?.and_then(Value::as_map_mut) {
                    owner.insert(property, Value::string(target));
                }
            }
        }
    }
    Ok(())
}

/// Whether `entity` lacks `property` and should receive a default for it.
///
/// A present key, even an explicit null, always wins. Schema entities named
/// after their namespace and nodes listing several namespaces already
/// reference them.
fn misses_property(path: &Path, entity: &Mapping, property: &str) -> bool {
    if entity.contains_key(property) {
        return false;
    }
    if property == NAMESPACE {
        let is_named_schema =
            path.to_string().starts_with(SCHEMA_ENTITY_PREFIX) && entity.contains_key(NAME);
        return !is_named_schema && !entity.contains_key(NAMESPACES);
    }
    true
}

/// Identifier of the default entity in the top-level `collection`, if any.
fn default_entity(
    doc: &Value,
    path: &Path,
    property: &str,
    collection: &str,
) -> ConfigResult<Option<String>> {
    let Some(entities) = doc
        .as_map()
        .and_then(|root| root.get(collection))
        .and_then(Value::as_list)
    else {
        return Ok(None);
    };
    let flagged: Vec<&Value> = entities
        .iter()
        .filter(|entity| {
            entity
                .as_map()
                .and_then(|fields| fields.get(DEFAULT))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
        .collect();
    let chosen = match (flagged.as_slice(), entities) {
        ([only], _) => *only,
        ([], [only]) => only,
        ([], _) => {
            debug!(%path, property, collection, "no default entity to reference");
            return Ok(None);
        }
        _ => {
            return Err(ConfigError::unresolved(
                path.to_string(),
                property,
                format!("{} entities in '{collection}' are marked as default", flagged.len()),
            ));
        }
    };
    let identifier = identifier_property(collection);
    chosen
        .as_map()
        .and_then(|fields| fields.get(identifier))
        .and_then(Value::scalar_text)
        .map(Some)
        .ok_or_else(|| {
            ConfigError::unresolved(
                path.to_string(),
                property,
                format!("the default entity in '{collection}' has no {identifier}"),
            )
        })
}
