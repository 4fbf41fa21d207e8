//! Error types for sync-meta

use crate::transcoder::MetadataFormatError;

/// Result type for sync-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`MetadataProcessor`](crate::MetadataProcessor).
///
/// Each kind maps to a distinct diagnostic for the caller; none of them is
/// retried or recovered from inside this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed document: {0}")]
    MalformedDocument(#[source] sync_xml::Error),

    #[error("Invalid metadata: {0}")]
    MetadataFormat(#[from] MetadataFormatError),

    #[error("Found {count} metadata comments, expected at most one")]
    MultipleMetadata { count: usize },

    #[error("Document error: {0}")]
    Document(#[from] sync_xml::Error),
}
