//! Pluggable metadata payload formats.
//!
//! The processor only ever sees a payload string. Turning it into a value
//! and back is the job of a [`MetadataParser`] / [`MetadataFormatter`] pair.

mod escape;
mod json;
mod key_value;
mod raw;

pub use json::{JsonMetadata, JsonTranscoder};
pub use key_value::{InternalName, KeyValueTranscoder, TemplateMetadata};
pub use raw::RawTranscoder;

/// Errors raised when a payload does not follow the expected grammar
#[derive(Debug, thiserror::Error)]
pub enum MetadataFormatError {
    #[error("line {line}: expected `key: value`, found {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: duplicate key {key:?}")]
    DuplicateKey { line: usize, key: String },

    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("invalid internal name {value:?}, expected `namespace:name`")]
    InvalidInternalName { value: String },

    #[error("invalid JSON metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes a marker payload
pub trait MetadataParser {
    type Metadata;

    fn parse(&self, raw: &str) -> Result<Self::Metadata, MetadataFormatError>;
}

/// Encodes metadata as a marker payload. Must not fail for any in-memory value.
pub trait MetadataFormatter {
    type Metadata;

    fn format(&self, metadata: &Self::Metadata) -> String;
}
