//! Rule tables driving the normalization passes.
//!
//! Every table is built once, on first use, and is read-only afterwards, so
//! concurrent normalization runs share them freely. Path patterns are regular
//! expressions over canonical paths and always match the whole path.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::{Mapping, Value};

/// Revision of the rule tables. Bump when a table changes meaning.
pub const RULES_REVISION: u32 = 3;

/// Property naming the entity a node identifies itself by.
pub const NAME: &str = "name";
/// Property flagging the default entity of a collection.
pub const DEFAULT: &str = "default";
/// Reference to a namespace prefix.
pub const NAMESPACE: &str = "namespace";
/// Top-level collection of namespace declarations.
pub const NAMESPACES: &str = "namespaces";
/// Property holding a content block.
pub const CONTENT: &str = "content";
/// Declared format of a content block.
pub const FORMAT: &str = "format";
/// Inline text of a content block.
pub const TEXT: &str = "text";
/// Structured payload of a content block.
pub const DATA: &str = "data";
/// Name of an external resource holding a content block's text.
pub const RESOURCE: &str = "resource";
/// Document version property.
pub const VERSION: &str = "version";
/// Version assumed when a document does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Path prefix of schema entities, which are named after their namespace.
pub const SCHEMA_ENTITY_PREFIX: &str = "/pdiSchemas/";

/// Compiles a constant pattern.
#[expect(
    clippy::expect_used,
    reason = "patterns are constants exercised by the rule table tests"
)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("constant pattern must compile")
}

fn anchored(pattern: &str) -> Regex {
    compile(&format!("^(?:{pattern})$"))
}

/// Reference properties implied for every node whose path matches `pattern`.
#[derive(Debug)]
pub struct ReferenceRule {
    /// Anchored path pattern.
    pub pattern: Regex,
    /// Implied reference properties, in insertion order.
    pub properties: &'static [&'static str],
}

const APPLICATION: &str = "application";
const TENANT: &str = "tenant";
const SPACE: &str = "space";
const XDB_STORE: &str = "xdbStore";
const SEARCH: &str = "search";
const SEARCH_COMPOSITION: &str = "searchComposition";

const REFERENCE_TABLE: &[(&str, &[&str])] = &[
    (r"/.*/content", &[APPLICATION, "store"]),
    (r"/.+/((.+\.)?q|.+Q)uery", &[NAMESPACE]),
    (r"/aics/\d+", &[APPLICATION]),
    (r"/aips/\d+", &[APPLICATION, "xdbLibrary"]),
    (r"/applicationCategories/\d+", &[TENANT]),
    (r"/applications/\d+", &[TENANT]),
    (r"/buckets/\d+", &["spaceRootObject"]),
    (r"/confirmations/\d+", &[APPLICATION, "deliveryChannel"]),
    (r"/customPresentationConfigurations/\d+", &["exportPipeline", TENANT]),
    (r"/databases/\d+", &[APPLICATION, "ciStore", "managedItemStore", XDB_STORE]),
    (r"/databaseCryptoes/\d+", &[APPLICATION, "database"]),
    (r"/deliveryChannels/\d+", &[APPLICATION, "store"]),
    (r"/exportConfigurations/\d+", &["pipeline", TENANT, "transformation"]),
    (r"/exportPipelines/\d+", &[APPLICATION, TENANT]),
    (r"/exportTransformations/\d+", &[APPLICATION, TENANT]),
    (r"/fileSystemFolders/\d+", &["parentSpaceRootFolder"]),
    (
        r"/holdings/\d+",
        &[
            APPLICATION,
            "ciStore",
            "ingest",
            "logStore",
            "managedItemStore",
            "pdi",
            "renditionStore",
            "sipStore",
            "stagingStore",
            "xdbLibrary",
            "xdbLibraryPolicy",
            XDB_STORE,
            "xmlStore",
        ],
    ),
    (r"/holdingCryptoes/\d+", &[APPLICATION, "cryptoObject", "holding", "pdiCrypto"]),
    (r"/ingests/\d+", &[APPLICATION]),
    (r"/ingestNodes/\d+", &[APPLICATION]),
    (r"/orders/\d+", &[APPLICATION]),
    (r"/pdis/\d+", &[APPLICATION]),
    (r"/pdiCryptoes/\d+", &[APPLICATION]),
    (r"/pdiSchemas/\d+", &[APPLICATION, NAMESPACE]),
    (r"/queries/\d+", &[APPLICATION, NAMESPACE, "order", "queryQuota"]),
    (r"/queries/[^/]+/xdbPdiConfigs", &[NAMESPACE]),
    (r"/queryQuotas/\d+", &[APPLICATION]),
    (r"/receiverNodes/\d+", &[APPLICATION]),
    (r"/resultConfigurationHelpers/\d+", &[APPLICATION, NAMESPACE]),
    (r"/resultMasters/\d+", &[SEARCH, SEARCH_COMPOSITION]),
    (r"/resultMasters/\d+/panels/\d+/tabs/\d+", &["exportConfiguration"]),
    (r"/schemas/\d+", &["database", XDB_STORE]),
    (r"/searches/\d+", &["aic", APPLICATION, "searchGroup", "query"]),
    (r"/searchGroups/\d+", &[APPLICATION]),
    (r"/searchCompositions/\d+", &["resultMaster", SEARCH, "xform"]),
    (r"/spaces/\d+", &[APPLICATION]),
    (r"/spaceRootFolders/\d+", &["fileSystemRoot", SPACE]),
    (r"/spaceRootObjects/\d+", &[SPACE]),
    (r"/spaceRootXdbLibraries/\d+", &[SPACE, "xdbDatabase"]),
    (r"/stores/\d+", &[APPLICATION, "fileSystemFolder"]),
    (r"/storageEndPointCredentials/\d+", &["storageEndPoint"]),
    (r"/tables/\d+", &[APPLICATION, "schema"]),
    (r"/transformations/\d+", &[APPLICATION]),
    (r"/valueLists/\d+", &[APPLICATION]),
    (r"/xdbDatabases/\d+", &["xdbFederation"]),
    (r"/xdbLibraries/\d+", &[APPLICATION, "spaceRootXdbLibrary"]),
    (r"/xdbLibraryPolicies/\d+", &[APPLICATION]),
    (r"/xforms/\d+", &[SEARCH, SEARCH_COMPOSITION]),
    (r"/xqueries/\d+", &[SEARCH, SEARCH_COMPOSITION]),
    (r"/xqueryModules/\d+", &[APPLICATION, TENANT]),
];

/// Path pattern → implied reference properties.
pub static REFERENCE_RULES: LazyLock<Vec<ReferenceRule>> = LazyLock::new(|| {
    REFERENCE_TABLE
        .iter()
        .map(|&(pattern, properties)| ReferenceRule {
            pattern: anchored(pattern),
            properties,
        })
        .collect()
});

const TYPE_BY_REFERENCE_PROPERTY: &[(&str, &str)] = &[
    ("pipeline", "exportPipeline"),
    ("transformation", "exportTransformation"),
    ("parentSpaceRootFolder", "spaceRootFolder"),
];

/// Entity type referenced by `property`; the property itself unless overridden.
#[must_use]
pub fn reference_type(property: &str) -> &str {
    TYPE_BY_REFERENCE_PROPERTY
        .iter()
        .find_map(|(candidate, kind)| (*candidate == property).then_some(*kind))
        .unwrap_or(property)
}

/// Property that identifies an entity within `collection`.
///
/// Namespaces are known by their prefix; everything else by its name.
#[must_use]
pub fn identifier_property(collection: &str) -> &'static str {
    if collection == NAMESPACES { "prefix" } else { NAME }
}

/// Nodes below the top level whose map-of-maps form becomes a named list.
pub static NESTED_SEQUENCES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/queries/\d+/xdbPdiConfigs/operands",
        r"/resultMasters/\d+/panels",
        r"/resultMasters/\d+/panels/\d+/tabs",
    ]
    .into_iter()
    .map(anchored)
    .collect()
});

/// A singular reference that is rewritten into a one-element list.
#[derive(Debug)]
pub struct ReferenceCollection {
    /// Anchored pattern of the owning entity.
    pub pattern: Regex,
    /// Singular property name; the list lives under its plural.
    pub property: &'static str,
}

/// Entities whose singular references are really reference collections.
pub static REFERENCE_COLLECTIONS: LazyLock<Vec<ReferenceCollection>> = LazyLock::new(|| {
    [(r"/confirmations/\d+", "holding"), (r"/queries/\d+", "aic")]
        .into_iter()
        .map(|(pattern, property)| ReferenceCollection {
            pattern: anchored(pattern),
            property,
        })
        .collect()
});

/// Enum-valued properties of entities matching `pattern`.
#[derive(Debug)]
pub struct EnumRule {
    /// Anchored pattern of the owning entity.
    pub pattern: Regex,
    /// Properties holding an enum scalar or a list of them.
    pub properties: &'static [&'static str],
}

/// Enum-valued properties, canonicalized to `UPPER_SNAKE` form.
pub static ENUM_RULES: LazyLock<Vec<EnumRule>> = LazyLock::new(|| {
    const TABLE: &[(&str, &[&str])] = &[
        (r"/applications/\d+", &["type", "archiveType"]),
        (r"/confirmations/\d+", &["types"]),
        (r"/exportConfigurations/\d+", &["exportType"]),
        (r"/holdings/\d+", &["xdbMode"]),
        (r"/queries/\d+/xdbPdiConfigs/operands/\d+", &["type"]),
        (r"/stores/\d+", &["type", "storeType"]),
    ];
    TABLE
        .iter()
        .map(|&(pattern, properties)| EnumRule {
            pattern: anchored(pattern),
            properties,
        })
        .collect()
});

/// A literal default injected when `property` is absent.
#[derive(Debug)]
pub struct DefaultValue {
    /// Anchored pattern of the owning entity.
    pub pattern: Regex,
    /// Property receiving the default.
    pub property: &'static str,
    /// Builds the default value.
    pub value: fn() -> Value,
}

/// Entities named after the namespace they describe.
pub static SCHEMA_ENTITIES: LazyLock<Regex> = LazyLock::new(|| anchored(r"/pdiSchemas/\d+"));

/// Processors of the ingest pipeline used when an ingest declares no content.
pub const DEFAULT_INGEST_PROCESSORS: &[&str] = &["sip.download", "pdi.index.creator"];

fn default_ingest_content() -> Value {
    let processors = DEFAULT_INGEST_PROCESSORS
        .iter()
        .map(|id| Value::Map(Mapping::new().with("id", *id)))
        .collect::<Vec<_>>();
    Value::Map(
        Mapping::new()
            .with(FORMAT, "yaml")
            .with("processors", processors),
    )
}

fn default_receiver_sips() -> Value {
    Value::List(vec![Value::Map(Mapping::new().with(FORMAT, "sip_zip"))])
}

/// Literal defaults per entity pattern.
pub static DEFAULT_VALUES: LazyLock<Vec<DefaultValue>> = LazyLock::new(|| {
    let table: [(&str, &'static str, fn() -> Value); 4] = [
        (r"/exportPipelines/\d+", "includesContent", || Value::from(true)),
        (r"/holdings/\d+", "xdbMode", || Value::string("PRIVATE")),
        (r"/ingests/\d+", CONTENT, default_ingest_content),
        (r"/receiverNodes/\d+", "sips", default_receiver_sips),
    ];
    table
        .into_iter()
        .map(|(pattern, property, value)| DefaultValue {
            pattern: anchored(pattern),
            property,
            value,
        })
        .collect()
});

/// Fields holding query text that may need namespace declarations.
pub static QUERY_FIELD: LazyLock<Regex> = LazyLock::new(|| anchored(r"/.+/((.+\.)?q|.+Q)uery"));

/// Fields holding path expressions rewritten into Clark notation.
pub static PATH_FIELDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/queries/\d+/xdbPdiConfigs/entityPath",
        r"/queries/\d+/xdbPdiConfigs/operands/\d+/path",
    ]
    .into_iter()
    .map(anchored)
    .collect()
});

/// Embedded content grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// PDI processing data with index definitions.
    Pdi,
    /// Ingest processor pipeline.
    Ingest,
    /// Result configuration helper elements.
    ResultHelper,
}

/// Content-block locations and the grammar their `yaml` payload follows.
pub static CONTENT_GRAMMARS: LazyLock<Vec<(Regex, Grammar)>> = LazyLock::new(|| {
    [
        (r"/pdis/\d+/content", Grammar::Pdi),
        (r"/ingests/\d+/content", Grammar::Ingest),
        (r"/resultConfigurationHelpers/\d+/content", Grammar::ResultHelper),
    ]
    .into_iter()
    .map(|(pattern, grammar)| (anchored(pattern), grammar))
    .collect()
});

/// Registered ingest processors: `id → (class, name)`.
const PROCESSORS: &[(&str, &str, &str)] = &[
    (
        "sip.download",
        "com.emc.ia.ingestion.processor.downloader.SipContentDownloader",
        "SIP downloader processor",
    ),
    (
        "pdi.index.creator",
        "com.emc.ia.ingestion.processor.index.IndexesCreator",
        "XDB PDI index processor",
    ),
    (
        "ri.index",
        "com.emc.ia.ingestion.processor.index.IndexesCreator",
        "RI XDB indexes",
    ),
    (
        "ci.hash",
        "com.emc.ia.ingestion.processor.content.CiHashProcessor",
        "CI hash generator and validator",
    ),
];

/// Class and display name registered for an ingest processor id.
#[must_use]
pub fn processor(id: &str) -> Option<(&'static str, &'static str)> {
    PROCESSORS
        .iter()
        .find_map(|(candidate, class, name)| (*candidate == id).then_some((*class, *name)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        CONTENT_GRAMMARS, DEFAULT_VALUES, ENUM_RULES, NESTED_SEQUENCES, PATH_FIELDS, QUERY_FIELD,
        REFERENCE_COLLECTIONS, REFERENCE_RULES, processor, reference_type,
    };

    #[test]
    fn every_table_compiles() {
        assert!(!REFERENCE_RULES.is_empty());
        assert!(!NESTED_SEQUENCES.is_empty());
        assert!(!REFERENCE_COLLECTIONS.is_empty());
        assert!(!ENUM_RULES.is_empty());
        assert!(!DEFAULT_VALUES.is_empty());
        assert!(!PATH_FIELDS.is_empty());
        assert!(!CONTENT_GRAMMARS.is_empty());
    }

    #[rstest]
    #[case("/xdbLibraryPolicies/0/closeHintDateQuery", true)]
    #[case("/ingests/0/content/processors/3/data/select.query", true)]
    #[case("/queries/0", false)]
    #[case("/searches/0/query", true)]
    #[case("/xqueries/0", false)]
    fn query_fields(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(QUERY_FIELD.is_match(path), expected);
    }

    #[test]
    fn patterns_match_whole_paths() {
        let holdings = REFERENCE_RULES
            .iter()
            .find(|rule| rule.properties.contains(&"xmlStore"))
            .map(|rule| &rule.pattern);
        assert!(holdings.is_some_and(|p| p.is_match("/holdings/12")));
        assert!(holdings.is_some_and(|p| !p.is_match("/holdings/12/sips")));
        assert!(holdings.is_some_and(|p| !p.is_match("/x/holdings/1")));
    }

    #[rstest]
    #[case("pipeline", "exportPipeline")]
    #[case("transformation", "exportTransformation")]
    #[case("parentSpaceRootFolder", "spaceRootFolder")]
    #[case("tenant", "tenant")]
    fn reference_types(#[case] property: &str, #[case] expected: &str) {
        assert_eq!(reference_type(property), expected);
    }

    #[test]
    fn processor_registry() {
        assert_eq!(
            processor("sip.download"),
            Some((
                "com.emc.ia.ingestion.processor.downloader.SipContentDownloader",
                "SIP downloader processor"
            ))
        );
        assert_eq!(processor("sip.unknown"), None);
    }
}
