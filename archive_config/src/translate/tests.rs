//! Unit tests for embedded content translation.

use anyhow::{Result, ensure};
use rstest::rstest;

use crate::normalize::Normalizer;
use crate::value::{Path, Value};

const INGEST: &str = r#"
namespaces:
  - prefix: ri
    uri: urn:x-emc:ia:schema:ri
ingest:
  name: PhoneCalls-ingest
  content:
    format: yaml
    processors:
      - id: sip.download
      - id: pdi.index.creator
        data:
          key.document.name: xdb.pdi.name
          indexes: ~
      - id: ri.index
        data:
          key.document.name: xdb.ri.name
          indexes:
            key:
              type: path.value.index
              path: /ri:ris/ri:ri[@key<STRING>]
      - id: ci.hash
        data:
          select.query:
            namespace: ri
            text: |-
              let $uri := replace(document-uri(.), '\.pdi$', '.ri')
              for $c in doc($uri)/ri:ris/ri:ri
              return <content filename="{ $c/@key }">
                <hash encoding="hex" algorithm="SHA-1" provided="false" />
              </content>
"#;

const INGEST_XML: &str = r#"<processors>
  <processor>
    <class>com.emc.ia.ingestion.processor.downloader.SipContentDownloader</class>
    <id>sip.download</id>
    <name>SIP downloader processor</name>
  </processor>
  <processor>
    <class>com.emc.ia.ingestion.processor.index.IndexesCreator</class>
    <data>
      <indexes/>
      <key.document.name>xdb.pdi.name</key.document.name>
    </data>
    <id>pdi.index.creator</id>
    <name>XDB PDI index processor</name>
  </processor>
  <processor>
    <class>com.emc.ia.ingestion.processor.index.IndexesCreator</class>
    <data>
      <indexes>
        <path.value.index>
          <build.without.logging>false</build.without.logging>
          <compressed>false</compressed>
          <concurrent>false</concurrent>
          <name>key</name>
          <path>/{urn:x-emc:ia:schema:ri}ris/{urn:x-emc:ia:schema:ri}ri[@key&lt;STRING>]</path>
          <unique.keys>true</unique.keys>
        </path.value.index>
      </indexes>
      <key.document.name>xdb.ri.name</key.document.name>
    </data>
    <id>ri.index</id>
    <name>RI XDB indexes</name>
  </processor>
  <processor>
    <class>com.emc.ia.ingestion.processor.content.CiHashProcessor</class>
    <data>
      <select.query><![CDATA[
        declare namespace ri = "urn:x-emc:ia:schema:ri";
        let $uri := replace(document-uri(.), '\.pdi$', '.ri')
        for $c in doc($uri)/ri:ris/ri:ri
        return <content filename="{ $c/@key }">
          <hash encoding="hex" algorithm="SHA-1" provided="false" />
        </content>
      ]]></select.query>
    </data>
    <id>ci.hash</id>
    <name>CI hash generator and validator</name>
  </processor>
</processors>
"#;

const RESULT_HELPER: &str = r"
namespaces:
  - prefix: n
    uri: urn:eas-samples:en:xsd:phonecalls.1.0
    default: true
  - prefix: pdi
    uri: urn:x-emc:ia:schema:pdi
resultConfigurationHelper:
  name: PhoneCalls-result-configuration-helper
  propagateChanges: false
  content:
    format: yaml
    namespaces: [n, pdi]
    data:
      - id:
          label: ID
          path: '@pdi:id'
          type: id
      - SentToArchiveDate:
          label: Sent to
          path: n:SentToArchiveDate
          type: date time
";

const RESULT_HELPER_XML: &str = r#"<resultConfigurationHelper xmlns:n="urn:eas-samples:en:xsd:phonecalls.1.0" xmlns:pdi="urn:x-emc:ia:schema:pdi">
  <element>
    <label>ID</label>
    <name>id</name>
    <path>@pdi:id</path>
    <type>ID</type>
  </element>
  <element>
    <label>Sent to</label>
    <name>SentToArchiveDate</name>
    <path>n:SentToArchiveDate</path>
    <type>DATE_TIME</type>
  </element>
</resultConfigurationHelper>
"#;

const PDI: &str = r"
namespaces:
  - prefix: n
    uri: urn:gnu
  - prefix: ex
    uri: urn:example
pdis:
  - name: PhoneCalls-pdi
    content:
      format: yaml
      data:
        - id: pdi.index.creator
          key.document.name: xdb.pdi.name
          indexes:
            - gnat:
                type: path.value.index
                path: /n:gnu/n:gnat
            - bar:
                type: path.value.index
                path: /n:foo/n:bar[n:baz]
            - words:
                type: full.text.index
        - id: pdi.transformer
          result.schema: ex
          level: 2
";

fn content_text(doc: &Value, content: &str) -> Option<String> {
    doc.find(&Path::parse(content).key("text"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[test]
fn translates_ingest_processors() -> Result<()> {
    let doc = Normalizer::new().normalize_yaml(INGEST)?;
    let format = doc.find(&Path::parse("/ingests/0/content/format"));
    ensure!(format.and_then(Value::as_str) == Some("xml"));
    assert_eq!(content_text(&doc, "/ingests/0/content").as_deref(), Some(INGEST_XML));
    ensure!(doc.find(&Path::parse("/ingests/0/content/processors")).is_none());
    Ok(())
}

#[test]
fn translates_result_configuration_helper() -> Result<()> {
    let doc = Normalizer::new().normalize_yaml(RESULT_HELPER)?;
    let content = Path::parse("/resultConfigurationHelpers/0/content");
    ensure!(doc.find(&content.key("format")).and_then(Value::as_str) == Some("xml"));
    ensure!(
        doc.find(&content.key("namespaces")).is_none(),
        "namespaces must be consumed by translation"
    );
    assert_eq!(
        content_text(&doc, "/resultConfigurationHelpers/0/content").as_deref(),
        Some(RESULT_HELPER_XML)
    );
    Ok(())
}

#[rstest]
#[case::first_path("/{urn:gnu}gnu/{urn:gnu}gnat")]
#[case::second_path("/{urn:gnu}foo/{urn:gnu}bar[{urn:gnu}baz]")]
#[case::compressed_default("<compressed>false</compressed>")]
#[case::full_text_default("<filter.english.stop.words>false</filter.english.stop.words>")]
#[case::result_schema("<result.schema>urn:example</result.schema>")]
#[case::descriptor("<data id=\"pdi.transformer\">")]
#[case::number("<level>2</level>")]
fn translates_pdi_indexes(#[case] expected: &str) -> Result<()> {
    let doc = Normalizer::new().normalize_yaml(PDI)?;
    let xml = content_text(&doc, "/pdis/0/content").unwrap_or_default();
    ensure!(xml.starts_with("<datas>\n"), "unexpected root:\n{xml}");
    ensure!(xml.contains(expected), "missing {expected} in:\n{xml}");
    Ok(())
}

#[test]
fn translation_is_not_repeated() -> Result<()> {
    let normalizer = Normalizer::new();
    let mut doc = normalizer.normalize_yaml(INGEST)?;
    let once = doc.clone();
    normalizer.normalize(&mut doc)?;
    ensure!(doc == once, "second normalization changed the document");
    Ok(())
}

#[test]
fn leaves_content_without_grammar_alone() -> Result<()> {
    let doc = Normalizer::new()
        .normalize_yaml("xforms:\n  - name: form\n    content:\n      format: yaml\n      data: {}\n")?;
    let format = doc.find(&Path::parse("/xforms/0/content/format"));
    ensure!(format.and_then(Value::as_str) == Some("yaml"));
    Ok(())
}
