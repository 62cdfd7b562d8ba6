/// Indentation-aware text builder shared by every template.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    indent: usize,
}

const INDENT: &str = "    ";

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::with_capacity(2048),
            indent: 0,
        }
    }

    /// Write one line at the current indentation. Empty text writes a bare newline.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// `header {` and indent.
    pub(crate) fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.indent += 1;
        self
    }

    pub(crate) fn close(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line("}")
    }

    /// `<tag ...>` and indent. Attributes may follow the element name.
    pub(crate) fn open_tag(&mut self, tag: impl AsRef<str>) -> &mut Self {
        self.line(format!("<{}>", tag.as_ref()));
        self.indent += 1;
        self
    }

    pub(crate) fn close_tag(&mut self, name: &str) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line(format!("</{name}>"))
    }

    /// `package x;` followed by the sorted import block.
    pub(crate) fn preamble<'a>(
        &mut self,
        package: &str,
        imports: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.line(format!("package {package};"));
        let mut imports: Vec<&str> = imports.into_iter().collect();
        imports.sort_unstable();
        imports.dedup();
        if !imports.is_empty() {
            self.blank();
            for import in imports {
                self.line(format!("import {import};"));
            }
        }
        self.blank()
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
