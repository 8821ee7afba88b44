//! Generic rendering of processor data sub-trees.

use super::indexes::{INDEXES, write_indexes};
use super::schema_order;
use super::xml_writer::XmlWriter;
use crate::error::ConfigResult;
use crate::namespace::Namespaces;
use crate::rules::QUERY_FIELD;
use crate::value::{Path, Scalar, Value};

/// Writes `value` as the element `tag`.
///
/// Maps become nested elements in alphabetical order, lists repeat the
/// element, query texts are wrapped in CDATA and `indexes` follows the index
/// grammar.
pub(super) fn write_field(
    writer: &mut XmlWriter,
    path: &Path,
    tag: &str,
    value: &Value,
    namespaces: &Namespaces,
) -> ConfigResult<()> {
    let field = path.key(tag);
    if tag == INDEXES {
        return write_indexes(writer, &field, value, namespaces);
    }
    match value {
        Value::Scalar(Scalar::Null) => writer.empty_element(tag),
        Value::Scalar(_) => {
            let text = value.scalar_text().unwrap_or_default();
            if QUERY_FIELD.is_match(&field.to_string()) {
                writer.cdata_element(tag, &text);
            } else {
                writer.text_element(tag, &text);
            }
        }
        Value::Map(map) if map.is_empty() => writer.empty_element(tag),
        Value::Map(map) => {
            writer.open(tag, &[]);
            for (child, child_value) in schema_order(map, &[]) {
                write_field(writer, &field, child, child_value, namespaces)?;
            }
            writer.close(tag);
        }
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                write_field(writer, &path.index(index), tag, item, namespaces)?;
            }
        }
    }
    Ok(())
}
