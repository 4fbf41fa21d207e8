//! Indenting serializer.
//!
//! Output rules:
//! - every document-level node starts on its own line
//! - element-only content is indented one level per depth
//! - an element holding any text is written inline, including its subtree
//! - empty elements are self-closed as `<name />`
//! - no trailing line break

use std::fmt::Write;

use crate::document::{Declaration, XmlDocument};
use crate::node::{Element, Node};
use crate::settings::WriterSettings;

/// Encoding label written into declarations; output is always a UTF-8 `String`
pub const OUTPUT_ENCODING: &str = "utf-8";

pub(crate) fn write_document(doc: &XmlDocument, settings: &WriterSettings) -> String {
    let mut writer = Writer {
        out: String::new(),
        settings,
    };

    if let Some(declaration) = doc.declaration() {
        writer.declaration(declaration);
    }
    for node in doc.children() {
        if !writer.out.is_empty() {
            writer.newline(0);
        }
        writer.node(node, 0, true);
    }

    writer.out
}

struct Writer<'a> {
    out: String,
    settings: &'a WriterSettings,
}

impl Writer<'_> {
    fn declaration(&mut self, declaration: &Declaration) {
        let _ = write!(
            self.out,
            "<?xml version=\"{}\" encoding=\"{OUTPUT_ENCODING}\"",
            declaration.version
        );
        if let Some(standalone) = declaration.standalone {
            let _ = write!(
                self.out,
                " standalone=\"{}\"",
                if standalone { "yes" } else { "no" }
            );
        }
        self.out.push_str("?>");
    }

    fn newline(&mut self, depth: usize) {
        self.out.push_str(self.settings.line_ending.as_str());
        for _ in 0..depth {
            self.out.push_str(&self.settings.indent);
        }
    }

    fn node(&mut self, node: &Node, depth: usize, indent: bool) {
        match node {
            Node::Element(element) => self.element(element, depth, indent),
            Node::Comment(text) => {
                let _ = write!(self.out, "<!--{text}-->");
            }
            Node::ProcessingInstruction { target, value } => match value {
                Some(value) => {
                    let _ = write!(self.out, "<?{target} {value}?>");
                }
                None => {
                    let _ = write!(self.out, "<?{target}?>");
                }
            },
            Node::Text(text) => escape_text(&mut self.out, text),
            Node::DocType(raw) => self.out.push_str(raw),
        }
    }

    fn element(&mut self, element: &Element, depth: usize, indent: bool) {
        self.out.push('<');
        self.out.push_str(&element.name);
        for attr in &element.attributes {
            let _ = write!(
                self.out,
                " {}={q}{}{q}",
                attr.name,
                attr.raw_value,
                q = attr.quote
            );
        }

        if element.children.is_empty() {
            self.out.push_str(" />");
            return;
        }
        self.out.push('>');

        let indent = indent && !element.has_text();
        for child in &element.children {
            if indent {
                self.newline(depth + 1);
            }
            self.node(child, depth + 1, indent);
        }
        if indent {
            self.newline(depth);
        }

        let _ = write!(self.out, "</{}>", element.name);
    }
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            // a raw CR would be normalized away when read back
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Attribute;
    use crate::settings::LineEnding;

    #[test]
    fn escapes_markup_in_text() {
        let mut out = String::new();
        escape_text(&mut out, "a < b && c > d");
        assert_eq!(out, "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn escapes_carriage_return() {
        let mut out = String::new();
        escape_text(&mut out, "a\r\nb");
        assert_eq!(out, "a&#13;\nb");
    }

    #[test]
    fn mixed_content_is_inline() {
        let mut para = Element::new("p");
        para.children.push(Node::Text("Hello ".into()));
        let mut bold = Element::new("b");
        bold.children.push(Node::Element(Element::new("i")));
        para.children.push(Node::Element(bold));

        let mut root = Element::new("root");
        root.children.push(Node::Element(para));
        let doc = XmlDocument::from_parts(None, vec![Node::Element(root)]);

        assert_eq!(
            write_document(&doc, &WriterSettings::default()),
            "<root>\n  <p>Hello <b><i /></b></p>\n</root>"
        );
    }

    #[test]
    fn honours_settings() {
        let mut root = Element::new("root");
        root.attributes.push(Attribute::new("id", "1"));
        root.children.push(Node::Element(Element::new("child")));
        let doc = XmlDocument::from_parts(
            Some(Declaration::default()),
            vec![Node::Comment("c".into()), Node::Element(root)],
        );
        let settings = WriterSettings {
            indent: "\t".into(),
            line_ending: LineEnding::CrLf,
        };

        assert_eq!(
            write_document(&doc, &settings),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<!--c-->\r\n<root id=\"1\">\r\n\t<child />\r\n</root>"
        );
    }
}
