//! Text comparison helpers for generated markup.

/// Returns the lines of `text` that contain `needle`, trimmed.
#[must_use]
pub fn lines_containing<'a>(text: &'a str, needle: &str) -> Vec<&'a str> {
    text.lines()
        .filter(|line| line.contains(needle))
        .map(str::trim)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::lines_containing;

    #[test]
    fn lines_containing_trims_matches() {
        let xml = "<a>\n  <name>key</name>\n  <path>/x</path>\n</a>\n";
        assert_eq!(lines_containing(xml, "<name>"), vec!["<name>key</name>"]);
    }

    #[test]
    fn lines_containing_keeps_document_order() {
        let xml = "<b>2</b>\n<a>\n  <b>1</b>\n</a>\n";
        assert_eq!(lines_containing(xml, "<b>"), vec!["<b>2</b>", "<b>1</b>"]);
    }
}
