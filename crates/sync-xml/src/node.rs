//! Owned XML node tree

use std::fmt;

/// Coarse classification of document content.
///
/// The XML declaration is not a node; see
/// [`XmlDocument::declaration`](crate::XmlDocument::declaration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Comment,
    Element,
    Other,
}

/// A node in an [`XmlDocument`](crate::XmlDocument)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
    /// Unescaped character data
    Text(String),
    /// Document type declaration, kept verbatim
    DocType(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Comment(_) => NodeKind::Comment,
            Self::ProcessingInstruction { .. } | Self::Text(_) | Self::DocType(_) => {
                NodeKind::Other
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&str> {
        match self {
            Self::Comment(text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn children(&self) -> &[Node] {
        match self {
            Self::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Element(element) => Some(&mut element.children),
            _ => None,
        }
    }
}

/// An element with its qualified name and attributes as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Raw value of the attribute with the given qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.raw_value.as_str())
    }

    /// Mixed content is written inline instead of indented
    pub(crate) fn has_text(&self) -> bool {
        self.children.iter().any(|c| matches!(c, Node::Text(_)))
    }
}

/// An attribute whose value keeps its original escaping and quote character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub raw_value: String,
    pub quote: char,
}

impl Attribute {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_value: raw_value.into(),
            quote: '"',
        }
    }
}

/// Child indices leading from the document to a node.
///
/// Only valid for the tree it was taken from, until that tree is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub(crate) fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// Borrowed view of a comment and its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode<'a> {
    pub path: NodePath,
    pub text: &'a str,
}
