//! Canonicalization of enum-like scalars.

use tracing::trace;

use super::Context;
use crate::error::ConfigResult;
use crate::rules::ENUM_RULES;
use crate::value::{Scalar, Value};

/// Canonical spelling of an enum constant: upper case, with spaces and
/// hyphens turned into underscores.
///
/// # Examples
///
/// ```
/// use archive_config::normalize::canonical_enum;
///
/// assert_eq!(canonical_enum("active archiving"), "ACTIVE_ARCHIVING");
/// assert_eq!(canonical_enum("date-time"), "DATE_TIME");
/// assert_eq!(canonical_enum("PRIVATE"), "PRIVATE");
/// ```
#[must_use]
pub fn canonical_enum(text: &str) -> String {
    text.trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

pub(super) fn apply(doc: &mut Value, _: &Context<'_>) -> ConfigResult<()> {
    for rule in ENUM_RULES.iter() {
        for path in doc.maps_matching(&rule.pattern) {
            let Some(entity) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
                continue;
            };
            for property in rule.properties {
                if let Some(value) = entity.get_mut(property) {
                    trace!(%path, property, "canonicalizing enum");
                    canonicalize(value);
                }
            }
        }
    }
    Ok(())
}

fn canonicalize(value: &mut Value) {
    match value {
        Value::Scalar(Scalar::String(text)) => *text = canonical_enum(text),
        Value::List(items) => items.iter_mut().for_each(canonicalize),
        Value::Map(_) | Value::Scalar(_) => {}
    }
}
