//! YAML front end backed by `serde-saphyr`.

use serde_saphyr::Options;

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;

/// Parses YAML text into a configuration tree.
///
/// Booleans are strict (`yes`/`no` stay strings), numbers become string
/// scalars and an empty document yields an empty map.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the text is not valid YAML.
///
/// # Examples
///
/// ```
/// use archive_config::{Path, Value, yaml};
///
/// let doc = yaml::parse("applications:\n  - name: PhoneCalls\n    default: true\n")?;
/// let flag = doc.find(&Path::parse("/applications/0/default"));
/// assert_eq!(flag.and_then(Value::as_bool), Some(true));
/// # Ok::<_, archive_config::ConfigError>(())
/// ```
pub fn parse(text: &str) -> ConfigResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::default());
    }
    let value: Value = serde_saphyr::from_str_with_options(
        text,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(ConfigError::parse)?;
    // A document holding only `~` parses as null.
    if value.is_null() {
        return Ok(Value::default());
    }
    Ok(value)
}
