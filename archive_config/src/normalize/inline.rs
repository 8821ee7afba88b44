//! Inlining of external content.
//!
//! `content: {resource: pdi.yml}` is replaced by the resource text. YAML
//! resources are parsed as well so the translator can read their payload.

use camino::Utf8Path;
use tracing::debug;

use super::Context;
use crate::error::ConfigResult;
use crate::rules::{CONTENT, DATA, FORMAT, RESOURCE, TEXT};
use crate::value::{Segment, Value};
use crate::yaml;

pub(super) fn apply(doc: &mut Value, context: &Context<'_>) -> ConfigResult<()> {
    let blocks = doc.paths_where(|path, node| {
        matches!(path.last(), Some(Segment::Key(key)) if key == CONTENT)
            && node
                .as_map()
                .and_then(|content| content.get(RESOURCE))
                .and_then(Value::as_str)
                .is_some()
    });
    for path in blocks {
        let Some(content) = doc.get_mut(&path)?.and_then(Value::as_map_mut) else {
            continue;
        };
        let Some(name) = content.remove(RESOURCE).as_ref().and_then(Value::scalar_text) else {
            continue;
        };
        debug!(%path, resource = %name, "inlining external content");
        let text = context.resolver.resolve(&name)?;
        if !content.contains_key(FORMAT)
            && let Some(format) = format_of(&name)
        {
            content.insert(FORMAT, Value::string(format));
        }
        let is_yaml = content
            .get(FORMAT)
            .and_then(Value::as_str)
            .is_some_and(|format| matches!(format, "yaml" | "yml"));
        if is_yaml {
            match yaml::parse(&text)? {
                Value::Map(parsed) => {
                    for (key, value) in parsed {
                        content.insert(key, value);
                    }
                }
                other => {
                    content.insert(DATA, other);
                }
            }
        }
        content.insert(TEXT, Value::string(text));
    }
    Ok(())
}

/// Content format implied by a resource's file extension.
fn format_of(name: &str) -> Option<String> {
    let extension = Utf8Path::new(name).extension()?.to_ascii_lowercase();
    Some(if extension == "yml" {
        "yaml".to_owned()
    } else {
        extension
    })
}
