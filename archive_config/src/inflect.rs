//! Pluralization of entity type names.
//!
//! Collections in a configuration document are named after the plural of the
//! entity type (`holding` → `holdings`, `databaseCrypto` → `databaseCryptoes`).
//! The rules only look at the end of a camel-case name, so the last word
//! decides the plural.

/// Maps a singular type name to the name of its collection.
pub trait Inflector: Send + Sync {
    /// Plural form of `word`. Words that are already plural are returned as is.
    fn plural(&self, word: &str) -> String;

    /// Returns `true` when `word` names a single entity rather than a collection.
    fn is_singular(&self, word: &str) -> bool {
        self.plural(word) != word
    }
}

/// Irregular domain nouns, checked against the end of a name.
const IRREGULAR: &[(&str, &str)] = &[
    ("data", "data"),
    ("metadata", "metadata"),
    ("index", "indexes"),
    ("status", "statuses"),
];

/// Suffix-rule inflector for English domain nouns.
///
/// # Examples
///
/// ```
/// use archive_config::inflect::{English, Inflector};
///
/// assert_eq!(English.plural("searchComposition"), "searchCompositions");
/// assert_eq!(English.plural("xdbLibraryPolicy"), "xdbLibraryPolicies");
/// assert_eq!(English.plural("holdingCrypto"), "holdingCryptoes");
/// assert_eq!(English.plural("search"), "searches");
/// assert_eq!(English.plural("holdings"), "holdings");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Inflector for English {
    fn plural(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        for (singular, plural) in IRREGULAR {
            if let Some(stem) = strip_word_suffix(word, singular) {
                return format!("{stem}{}", adjust_case(singular, plural, word));
            }
        }
        let lower = word.to_ascii_lowercase();
        if lower.ends_with("ss") || lower.ends_with("us") {
            return format!("{word}es");
        }
        if lower.ends_with('s') {
            return word.to_owned();
        }
        if lower.ends_with('x')
            || lower.ends_with('z')
            || lower.ends_with("ch")
            || lower.ends_with("sh")
        {
            return format!("{word}es");
        }
        if let Some(stem) = word.strip_suffix('y')
            && stem.chars().last().is_some_and(is_consonant)
        {
            return format!("{stem}ies");
        }
        if let Some(stem) = word.strip_suffix('o')
            && stem.chars().last().is_some_and(is_consonant)
        {
            return format!("{word}es");
        }
        format!("{word}s")
    }
}

/// Matches `suffix` as the last camel-case word of `word` (or the whole word).
fn strip_word_suffix<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    if word.eq_ignore_ascii_case(suffix) {
        return Some("");
    }
    let split = word.len().checked_sub(suffix.len())?;
    let tail = word.get(split..)?;
    let mut tail_chars = tail.chars();
    let first = tail_chars.next()?;
    let rest = tail_chars.as_str();
    let suffix_rest = suffix.get(1..)?;
    let matches = first.is_ascii_uppercase()
        && first.eq_ignore_ascii_case(&suffix.chars().next()?)
        && rest == suffix_rest;
    if matches { word.get(..split) } else { None }
}

/// Carries the capitalisation of the matched word over to its plural.
fn adjust_case(singular: &str, plural: &str, word: &str) -> String {
    let tail_start = word.len().saturating_sub(singular.len());
    let capitalised = word
        .get(tail_start..)
        .and_then(|tail| tail.chars().next())
        .is_some_and(|first| first.is_ascii_uppercase());
    let mut chars = plural.chars();
    match chars.next() {
        Some(first) if capitalised => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        _ => plural.to_owned(),
    }
}

const fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{English, Inflector};

    #[rstest]
    #[case("application", "applications")]
    #[case("tenant", "tenants")]
    #[case("namespace", "namespaces")]
    #[case("query", "queries")]
    #[case("xquery", "xqueries")]
    #[case("xdbLibrary", "xdbLibraries")]
    #[case("databaseCrypto", "databaseCryptoes")]
    #[case("pdiCrypto", "pdiCryptoes")]
    #[case("search", "searches")]
    #[case("exportPipeline", "exportPipelines")]
    #[case("spaceRootFolder", "spaceRootFolders")]
    #[case("holding", "holdings")]
    #[case("aic", "aics")]
    #[case("xform", "xforms")]
    #[case("pdi", "pdis")]
    #[case("index", "indexes")]
    #[case("fullTextIndex", "fullTextIndexes")]
    #[case("metadata", "metadata")]
    #[case("queryQuota", "queryQuotas")]
    #[case("holdings", "holdings")]
    fn pluralizes_domain_nouns(#[case] singular: &str, #[case] expected: &str) {
        assert_eq!(English.plural(singular), expected);
    }

    #[rstest]
    #[case("application", true)]
    #[case("resultConfigurationHelper", true)]
    #[case("applications", false)]
    #[case("namespaces", false)]
    #[case("data", false)]
    fn recognises_singular_names(#[case] word: &str, #[case] singular: bool) {
        assert_eq!(English.is_singular(word), singular);
    }
}
