//! Structural normalization: makes the shape of a document uniform before
//! the semantic passes run.
//!
//! The rewrites are idempotent; a normalized document passes through
//! unchanged.

use tracing::debug;

use super::{Context, root_map};
use crate::error::{ConfigError, ConfigResult};
use crate::inflect::Inflector;
use crate::rules::{NESTED_SEQUENCES, REFERENCE_COLLECTIONS, identifier_property};
use crate::value::{Mapping, Path, Value};

pub(super) fn apply(doc: &mut Value, context: &Context<'_>) -> ConfigResult<()> {
    let root = root_map(doc)?;
    pluralize_singular_entities(root, context.inflector)?;
    name_top_level_collections(root);
    name_nested_collections(doc)?;
    pluralize_reference_collections(doc, context.inflector)
}

/// `application: {..}` becomes `applications: [{..}]`.
fn pluralize_singular_entities(root: &mut Mapping, inflector: &dyn Inflector) -> ConfigResult<()> {
    let singular: Vec<String> = root
        .iter()
        .filter(|(key, value)| matches!(value, Value::Map(_)) && inflector.is_singular(key))
        .map(|(key, _)| key.to_owned())
        .collect();
    for key in singular {
        let Some(entity) = root.remove(&key) else {
            continue;
        };
        let plural = inflector.plural(&key);
        debug!(from = %key, to = %plural, "moving singular entity into its collection");
        append(root, &Path::root(), &plural, vec![entity])?;
    }
    Ok(())
}

/// `applications: {PhoneCalls: {..}}` becomes `applications: [{name: PhoneCalls, ..}]`.
fn name_top_level_collections(root: &mut Mapping) {
    for (key, value) in root.iter_mut() {
        if is_map_of_maps(value) {
            debug!(collection = key, "converting map of maps into a list");
            *value = named_list(std::mem::take(value), identifier_property(key));
        }
    }
}

fn name_nested_collections(doc: &mut Value) -> ConfigResult<()> {
    for pattern in NESTED_SEQUENCES.iter() {
        for path in doc.paths_matching(pattern) {
            if let Some(value) = doc.get_mut(&path)?
                && is_map_of_maps(value)
            {
                debug!(%path, "converting nested map of maps into a list");
                *value = named_list(std::mem::take(value), identifier_property(""));
            }
        }
    }
    Ok(())
}

/// A singular scalar reference such as a confirmation's `holding: X` becomes
/// `holdings: [X]`.
fn pluralize_reference_collections(doc: &mut Value, inflector: &dyn Inflector) -> ConfigResult<()> {
    for rule in REFERENCE_COLLECTIONS.iter() {
        for path in doc.maps_matching(&rule.pattern) {
            let Some(entity) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
                continue;
            };
            let references = match entity.get(rule.property) {
                Some(reference @ Value::Scalar(_)) if !reference.is_null() => vec![reference.clone()],
                Some(Value::List(items)) => items.clone(),
                _ => continue,
            };
            entity.remove(rule.property);
            let plural = inflector.plural(rule.property);
            debug!(%path, from = rule.property, to = %plural, "pluralizing reference");
            append(entity, &path, &plural, references)?;
        }
    }
    Ok(())
}

/// Appends `items` to the list under `key`, creating it when absent.
fn append(owner: &mut Mapping, owner_path: &Path, key: &str, items: Vec<Value>) -> ConfigResult<()> {
    match owner.get_mut(key) {
        Some(Value::List(existing)) => {
            existing.extend(items);
            Ok(())
        }
        Some(other) => Err(ConfigError::structure(
            owner_path.key(key).to_string(),
            format!("expected a list, found a {}", other.kind()),
        )),
        None => {
            owner.insert(key, Value::List(items));
            Ok(())
        }
    }
}

fn is_map_of_maps(value: &Value) -> bool {
    value
        .as_map()
        .is_some_and(|map| !map.is_empty() && map.values().all(|child| matches!(child, Value::Map(_))))
}

/// Turns each `key: {..}` entry into `{<identifier>: key, ..}`, keeping entry order.
fn named_list(value: Value, identifier: &str) -> Value {
    let Value::Map(map) = value else {
        return value;
    };
    let items = map
        .into_iter()
        .map(|(key, child)| match child {
            Value::Map(mut fields) => {
                fields.insert_first(identifier, Value::string(key));
                Value::Map(fields)
            }
            other => other,
        })
        .collect();
    Value::List(items)
}
