//! XML document model for Campaign Sync
//!
//! Loads XML into an owned tree, supports locating, removing and inserting
//! comments, and writes the tree back as indented text. A document written
//! without structural changes keeps its content; only indentation and the
//! declared encoding (always UTF-8) are normalized.

pub mod document;
pub mod error;
pub mod node;
mod parse;
pub mod settings;
pub mod writer;

pub use document::{Declaration, XmlDocument};
pub use error::{Error, Result};
pub use node::{Attribute, CommentNode, Element, Node, NodeKind, NodePath};
pub use settings::{LineEnding, WriterSettings};
pub use writer::OUTPUT_ENCODING;
