//! Ingest processor pipelines: `<processors>` with one `<processor>` per
//! descriptor, each identified by a registered id.

use super::data::write_field;
use super::schema_order;
use super::xml_writer::XmlWriter;
use crate::error::{ConfigError, ConfigResult};
use crate::namespace::Namespaces;
use crate::rules::{DATA, NAME, processor};
use crate::value::{Mapping, Path, Value};

pub(super) const PROCESSORS: &str = "processors";

const PROCESSOR: &str = "processor";
const CLASS: &str = "class";
const ID: &str = "id";
const PROCESSOR_ORDER: &[&str] = &[CLASS, DATA, ID, NAME];

pub(super) fn render(path: &Path, content: &Mapping, namespaces: &Namespaces) -> ConfigResult<String> {
    let (key, payload) = match (content.get(PROCESSORS), content.get(DATA)) {
        (Some(processors), _) => (PROCESSORS, Some(processors)),
        (None, data) => (DATA, data),
    };
    let payload_path = path.key(key);
    let descriptors = match payload {
        None => &[][..],
        Some(Value::List(items)) => items.as_slice(),
        Some(other) => {
            return Err(ConfigError::structure(
                payload_path.to_string(),
                format!("expected a list of processors, found a {}", other.kind()),
            ));
        }
    };

    let mut writer = XmlWriter::new();
    writer.open(PROCESSORS, &[]);
    for (index, descriptor) in descriptors.iter().enumerate() {
        let processor_path = payload_path.index(index);
        let fields = resolve(&processor_path, descriptor)?;
        writer.open(PROCESSOR, &[]);
        for (tag, value) in schema_order(&fields, PROCESSOR_ORDER) {
            if !value.is_null() || tag != DATA {
                write_field(&mut writer, &processor_path, tag, value, namespaces)?;
            }
        }
        writer.close(PROCESSOR);
    }
    writer.close(PROCESSORS);
    Ok(writer.finish())
}

/// Adds the registered class and name to a processor descriptor.
fn resolve(path: &Path, descriptor: &Value) -> ConfigResult<Mapping> {
    let Some(fields) = descriptor.as_map() else {
        return Err(ConfigError::structure(
            path.to_string(),
            format!("expected a processor, found a {}", descriptor.kind()),
        ));
    };
    let Some(id) = fields.get(ID).and_then(Value::scalar_text) else {
        return Err(ConfigError::structure(path.to_string(), "processor lacks an id"));
    };
    let (class, name) =
        processor(&id).ok_or_else(|| ConfigError::unknown_processor(path.to_string(), &id))?;
    let mut resolved = fields.clone();
    resolved.insert(CLASS, Value::string(class));
    resolved.insert(NAME, Value::string(name));
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::render;
    use crate::namespace::Namespaces;
    use crate::value::Path;
    use crate::{ConfigError, yaml};

    fn content(source: &str) -> Result<crate::value::Mapping> {
        let parsed = yaml::parse(source)?;
        parsed
            .as_map()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("content must be a map"))
    }

    #[test]
    fn processor_without_data_has_no_data_element() -> Result<()> {
        let xml = render(
            &Path::parse("/ingests/0/content"),
            &content("processors:\n  - id: sip.download\n")?,
            &Namespaces::default(),
        )?;
        assert_eq!(
            xml,
            concat!(
                "<processors>\n",
                "  <processor>\n",
                "    <class>com.emc.ia.ingestion.processor.downloader.SipContentDownloader</class>\n",
                "    <id>sip.download</id>\n",
                "    <name>SIP downloader processor</name>\n",
                "  </processor>\n",
                "</processors>\n",
            )
        );
        Ok(())
    }

    #[test]
    fn accepts_processors_under_data() -> Result<()> {
        let xml = render(
            &Path::parse("/ingests/0/content"),
            &content("data:\n  - id: ci.hash\n")?,
            &Namespaces::default(),
        )?;
        anyhow::ensure!(xml.contains("<class>com.emc.ia.ingestion.processor.content.CiHashProcessor</class>"));
        Ok(())
    }

    #[test]
    fn unknown_processor_is_an_error() -> Result<()> {
        let result = render(
            &Path::parse("/ingests/0/content"),
            &content("processors:\n  - id: no.such.processor\n")?,
            &Namespaces::default(),
        );
        match result {
            Err(ConfigError::UnknownProcessor { path, id }) => {
                anyhow::ensure!(id == "no.such.processor");
                anyhow::ensure!(path == "/ingests/0/content/processors/0");
            }
            other => anyhow::bail!("expected an unknown processor error, got {other:?}"),
        }
        Ok(())
    }
}
