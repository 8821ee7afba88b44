//! Unit tests for error construction and rendering.

use rstest::rstest;

use super::ConfigError;

#[rstest]
#[case::structure(
    ConfigError::structure("/holdings/0", "expected a map, found a list"),
    "Invalid structure at '/holdings/0': expected a map, found a list"
)]
#[case::unresolved(
    ConfigError::unresolved("/applications/0", "tenant", "2 candidates and none is marked default"),
    "Cannot resolve 'tenant' at '/applications/0': 2 candidates and none is marked default"
)]
#[case::processor(
    ConfigError::unknown_processor("/ingests/0/content/processors/1", "sip.mystery"),
    "Unknown ingest processor 'sip.mystery' at '/ingests/0/content/processors/1'"
)]
fn renders_messages(#[case] err: ConfigError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn unknown_resource_keeps_its_cause() {
    let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = ConfigError::unknown_resource_caused_by("ingest.yml", cause);
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("no such file"));
}

#[test]
fn unknown_resource_without_cause_has_no_source() {
    let err = ConfigError::unknown_resource("ingest.yml");
    assert!(std::error::Error::source(&err).is_none());
}
