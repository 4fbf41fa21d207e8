//! Owned XML document

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::node::{CommentNode, Element, Node, NodePath};
use crate::parse::parse_document;
use crate::settings::WriterSettings;
use crate::writer::write_document;

/// The `<?xml ...?>` declaration of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    /// Encoding the source declared. Serialized output always declares UTF-8.
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: None,
            standalone: None,
        }
    }
}

/// A parsed XML document that can be edited and written back to text.
///
/// The declaration is tracked apart from the node list: it is written first,
/// and only if the parsed input had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    declaration: Option<Declaration>,
    children: Vec<Node>,
}

impl XmlDocument {
    /// Parse well-formed XML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] with the failing position if the text is
    /// not well-formed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_xml::XmlDocument;
    ///
    /// let doc = XmlDocument::parse("<root><child/></root>").unwrap();
    /// assert!(doc.declaration().is_none());
    /// assert_eq!(doc.to_string(), "<root>\n  <child />\n</root>");
    ///
    /// assert!(XmlDocument::parse("<root>").unwrap_err().is_malformed());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let doc = parse_document(text)?;
        tracing::trace!(
            nodes = doc.children.len(),
            declaration = doc.declaration.is_some(),
            "Parsed XML document"
        );
        Ok(doc)
    }

    pub(crate) fn from_parts(declaration: Option<Declaration>, children: Vec<Node>) -> Self {
        Self {
            declaration,
            children,
        }
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Document-level nodes: prolog, root element and epilogue
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn root_element(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// All comments in document order, including those outside the root element
    pub fn comments(&self) -> Vec<CommentNode<'_>> {
        let mut comments = Vec::new();
        collect_comments(&self.children, &NodePath::default(), &mut comments);
        comments
    }

    /// Get the node at `path`
    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    /// Detach the node at `path` from its parent, returning it.
    ///
    /// Paths taken before this call may no longer point at the same nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `path` is empty or does not lead to
    /// a node; the document is left unchanged.
    pub fn remove_node(&mut self, path: &NodePath) -> Result<Node> {
        self.detach(path).ok_or_else(|| Error::NodeNotFound {
            path: path.to_string(),
        })
    }

    fn detach(&mut self, path: &NodePath) -> Option<Node> {
        let (last, parents) = path.indices().split_last()?;
        let mut siblings = &mut self.children;
        for index in parents {
            siblings = siblings.get_mut(*index)?.children_mut()?;
        }
        (*last < siblings.len()).then(|| siblings.remove(*last))
    }

    /// Insert a comment as the first node of the document.
    ///
    /// A declaration, if present, is still written before it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidComment`] if `text` contains `--`.
    pub fn prepend_comment(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if text.contains("--") {
            return Err(Error::InvalidComment { text });
        }
        self.children.insert(0, Node::Comment(text));
        Ok(())
    }

    /// Serialize with the given formatting
    pub fn to_xml_string(&self, settings: &WriterSettings) -> String {
        write_document(self, settings)
    }
}

fn collect_comments<'a>(nodes: &'a [Node], parent: &NodePath, out: &mut Vec<CommentNode<'a>>) {
    for (index, node) in nodes.iter().enumerate() {
        match node {
            Node::Comment(text) => out.push(CommentNode {
                path: parent.child(index),
                text,
            }),
            Node::Element(element) => {
                collect_comments(&element.children, &parent.child(index), out)
            }
            _ => {}
        }
    }
}

impl FromStr for XmlDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Serializes with [`WriterSettings::default`]
impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string(&WriterSettings::default()))
    }
}
