//! Injection of literal default values.
//!
//! Defaults fill absent properties only. A property that is present, even as
//! an explicit null, is never overwritten.

use tracing::trace;

use super::{Context, root_map};
use crate::error::ConfigResult;
use crate::rules::{DEFAULT_VALUES, DEFAULT_VERSION, VERSION};
use crate::value::Value;

/// Gives the document a version when it declares none.
pub(super) fn apply_document_defaults(doc: &mut Value, _: &Context<'_>) -> ConfigResult<()> {
    let root = root_map(doc)?;
    if !root.contains_key(VERSION) {
        root.insert_first(VERSION, Value::string(DEFAULT_VERSION));
    }
    Ok(())
}

/// Applies the entity-level default value table.
pub(super) fn apply(doc: &mut Value, _: &Context<'_>) -> ConfigResult<()> {
    for rule in DEFAULT_VALUES.iter() {
        for path in doc.maps_matching(&rule.pattern) {
            let Some(entity) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
                continue;
            };
            if entity.contains_key(rule.property) {
                continue;
            }
            trace!(%path, property = rule.property, "inserting default value");
            entity.insert(rule.property, (rule.value)());
        }
    }
    Ok(())
}
