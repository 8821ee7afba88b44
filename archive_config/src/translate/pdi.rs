//! PDI processing data: `<datas>` with one `<data id="...">` per descriptor.

use super::data::write_field;
use super::schema_order;
use super::xml_writer::XmlWriter;
use crate::error::{ConfigError, ConfigResult};
use crate::namespace::Namespaces;
use crate::rules::DATA;
use crate::value::{Mapping, Path, Value};

const ID: &str = "id";
const RESULT_SCHEMA: &str = "result.schema";

pub(super) fn render(path: &Path, content: &Mapping, namespaces: &Namespaces) -> ConfigResult<String> {
    let data_path = path.key(DATA);
    let descriptors = match content.get(DATA) {
        None => &[][..],
        Some(Value::List(items)) => items.as_slice(),
        Some(other) => {
            return Err(ConfigError::structure(
                data_path.to_string(),
                format!("expected a list of data descriptors, found a {}", other.kind()),
            ));
        }
    };

    let mut writer = XmlWriter::new();
    writer.open("datas", &[]);
    for (index, descriptor) in descriptors.iter().enumerate() {
        let descriptor_path = data_path.index(index);
        let Some(fields) = descriptor.as_map() else {
            return Err(ConfigError::structure(
                descriptor_path.to_string(),
                format!("expected a data descriptor, found a {}", descriptor.kind()),
            ));
        };
        write_descriptor(&mut writer, &descriptor_path, fields, namespaces)?;
    }
    writer.close("datas");
    Ok(writer.finish())
}

fn write_descriptor(
    writer: &mut XmlWriter,
    path: &Path,
    fields: &Mapping,
    namespaces: &Namespaces,
) -> ConfigResult<()> {
    let id = fields.get(ID).and_then(Value::scalar_text);
    let attributes: Vec<(&str, &str)> = id.as_deref().map(|value| (ID, value)).into_iter().collect();
    writer.open(DATA, &attributes);
    for (tag, value) in schema_order(fields, &[]) {
        match (tag, value) {
            (ID, _) => {}
            (RESULT_SCHEMA, Value::Scalar(_)) => {
                let schema = value.scalar_text().unwrap_or_default();
                let uri = namespaces.uri(&schema).unwrap_or(&schema);
                writer.text_element(tag, uri);
            }
            _ => write_field(writer, path, tag, value, namespaces)?,
        }
    }
    writer.close(DATA);
    Ok(())
}
