//! Loading XML text into the owned tree.
//!
//! Well-formedness checking is delegated to `roxmltree`. The resulting tree
//! is then copied into [`Node`]s, taking element names and attributes from
//! the raw start tags so that prefixes, namespace declarations and escaping
//! survive a round trip. `roxmltree` does not expose the XML declaration or
//! the DOCTYPE, so both are recovered from the prolog text.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{NodeType, ParsingOptions};

use crate::document::{Declaration, XmlDocument};
use crate::error::Result;
use crate::node::{Attribute, Element, Node};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

static DECLARATION_ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(version|encoding|standalone)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid declaration regex")
});

pub(crate) fn parse_document(text: &str) -> Result<XmlDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = roxmltree::Document::parse_with_options(text, options)?;

    let declaration = parse_declaration(text);
    let mut doctype = find_doctype(text, doc.root_element().range().start);

    let mut children = Vec::new();
    for node in doc.root().children() {
        if doctype
            .as_ref()
            .is_some_and(|(start, _)| node.range().start > *start)
        {
            if let Some((_, raw)) = doctype.take() {
                children.push(Node::DocType(raw));
            }
        }

        match node.node_type() {
            NodeType::Element => children.push(Node::Element(build_element(text, node, false))),
            NodeType::Comment => children.push(comment(node)),
            NodeType::PI => children.extend(processing_instruction(node)),
            // Only whitespace can sit outside the root element
            NodeType::Text | NodeType::Root => {}
        }
    }

    Ok(XmlDocument::from_parts(declaration, children))
}

fn build_element(source: &str, node: roxmltree::Node<'_, '_>, preserve_space: bool) -> Element {
    let (name, attributes) = scan_start_tag(&source[node.range().start..]);
    let preserve_space = match node.attribute((XML_NAMESPACE, "space")) {
        Some("preserve") => true,
        Some("default") => false,
        _ => preserve_space,
    };

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => {
                children.push(Node::Element(build_element(source, child, preserve_space)))
            }
            NodeType::Comment => children.push(comment(child)),
            NodeType::PI => children.extend(processing_instruction(child)),
            NodeType::Text => {
                let text = child.text().unwrap_or_default();
                if preserve_space || !text.chars().all(is_xml_whitespace) {
                    children.push(Node::Text(text.to_string()));
                }
            }
            NodeType::Root => {}
        }
    }

    Element {
        name,
        attributes,
        children,
    }
}

fn comment(node: roxmltree::Node<'_, '_>) -> Node {
    Node::Comment(node.text().unwrap_or_default().to_string())
}

fn processing_instruction(node: roxmltree::Node<'_, '_>) -> Option<Node> {
    node.pi().map(|pi| Node::ProcessingInstruction {
        target: pi.target.to_string(),
        value: pi.value.map(str::to_string),
    })
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Read the qualified name and attributes from an already validated start tag
fn scan_start_tag(tag: &str) -> (String, Vec<Attribute>) {
    let body = tag.strip_prefix('<').unwrap_or(tag);
    let name_end = body
        .find(|c: char| is_xml_whitespace(c) || c == '/' || c == '>')
        .unwrap_or(body.len());
    let name = body[..name_end].to_string();

    let mut attributes = Vec::new();
    let mut rest = &body[name_end..];
    loop {
        rest = rest.trim_start_matches(is_xml_whitespace);
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with('>') {
            break;
        }
        let Some(eq) = rest.find('=') else {
            break;
        };
        let attr_name = rest[..eq].trim_end_matches(is_xml_whitespace).to_string();
        rest = rest[eq + 1..].trim_start_matches(is_xml_whitespace);

        let Some(quote) = rest.chars().next() else {
            break;
        };
        let Some(close) = rest[1..].find(quote) else {
            break;
        };
        attributes.push(Attribute {
            name: attr_name,
            raw_value: rest[1..1 + close].to_string(),
            quote,
        });
        rest = &rest[close + 2..];
    }

    (name, attributes)
}

fn parse_declaration(text: &str) -> Option<Declaration> {
    let rest = text.strip_prefix("<?xml")?;
    if !rest.starts_with(is_xml_whitespace) {
        return None;
    }
    let end = rest.find("?>")?;

    let mut declaration = Declaration::default();
    for cap in DECLARATION_ATTR_PATTERN.captures_iter(&rest[..end]) {
        let value = cap
            .get(2)
            .or_else(|| cap.get(3))
            .map(|m| m.as_str().to_string());
        match &cap[1] {
            "version" => {
                if let Some(version) = value {
                    declaration.version = version;
                }
            }
            "encoding" => declaration.encoding = value,
            _ => declaration.standalone = value.map(|v| v == "yes"),
        }
    }
    Some(declaration)
}

/// Locate a DOCTYPE in the prolog, skipping comments and processing instructions
fn find_doctype(text: &str, prolog_end: usize) -> Option<(usize, String)> {
    let prolog = &text[..prolog_end];
    let mut pos = 0;
    while pos < prolog.len() {
        let rest = &prolog[pos..];
        if rest.starts_with("<!--") {
            pos += rest.find("-->").map_or(rest.len(), |i| i + 3);
        } else if rest.starts_with("<?") {
            pos += rest.find("?>").map_or(rest.len(), |i| i + 2);
        } else if rest.starts_with("<!DOCTYPE") {
            let len = doctype_len(rest)?;
            return Some((pos, rest[..len].to_string()));
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

fn doctype_len(source: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in source.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Some(i + 1),
                _ => {}
            },
        }
    }
    None
}
