//! Line-oriented XML output for embedded content.

const INDENT: &str = "  ";

/// Escapes element text. Only `&` and `<` are replaced.
pub(super) fn escape_text(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;")
}

/// Escapes a double-quoted attribute value.
pub(super) fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Splits every `]]>` so CDATA content cannot end its section early.
pub(super) fn escape_cdata(value: &str) -> String {
    value.replace("]]>", "]]]]><![CDATA[>")
}

pub(super) struct XmlWriter {
    buffer: String,
    indent: usize,
}

impl XmlWriter {
    pub(super) const fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
        }
    }

    pub(super) const fn indent(&mut self) {
        self.indent += 1;
    }

    pub(super) const fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Writes one line at the current depth. Blank lines stay blank.
    pub(super) fn line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(line);
        }
        self.buffer.push('\n');
    }

    /// `<tag>text</tag>`
    pub(super) fn text_element(&mut self, tag: &str, text: &str) {
        self.line(&format!("<{tag}>{}</{tag}>", escape_text(text)));
    }

    /// `<tag/>`
    pub(super) fn empty_element(&mut self, tag: &str) {
        self.line(&format!("<{tag}/>"));
    }

    /// Opens `tag` with the given attributes and indents its children.
    pub(super) fn open(&mut self, tag: &str, attributes: &[(&str, &str)]) {
        let mut start = format!("<{tag}");
        for (name, value) in attributes {
            start.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
        }
        start.push('>');
        self.line(&start);
        self.indent();
    }

    pub(super) fn close(&mut self, tag: &str) {
        self.outdent();
        self.line(&format!("</{tag}>"));
    }

    /// Writes `text` inside a CDATA section, one level deeper than the
    /// element itself. Only embedded `]]>` terminators are rewritten.
    pub(super) fn cdata_element(&mut self, tag: &str, text: &str) {
        self.line(&format!("<{tag}><![CDATA["));
        self.indent();
        for line in text.lines() {
            self.line(&escape_cdata(line));
        }
        self.outdent();
        self.line(&format!("]]></{tag}>"));
    }

    pub(super) fn finish(self) -> String {
        self.buffer
    }
}
