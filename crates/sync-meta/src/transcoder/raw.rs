//! Payload passed through as a plain string

use super::{MetadataFormatError, MetadataFormatter, MetadataParser};

/// Keeps the payload as an opaque `String`.
///
/// Parsing drops the single line break that follows the opening sentinel and
/// the one that precedes the closing sentinel, so formatting and parsing are
/// inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTranscoder;

impl MetadataParser for RawTranscoder {
    type Metadata = String;

    fn parse(&self, raw: &str) -> Result<String, MetadataFormatError> {
        let raw = raw
            .strip_prefix("\r\n")
            .or_else(|| raw.strip_prefix('\n'))
            .unwrap_or(raw);
        let raw = raw
            .strip_suffix("\r\n")
            .or_else(|| raw.strip_suffix('\n'))
            .unwrap_or(raw);
        Ok(raw.to_string())
    }
}

impl MetadataFormatter for RawTranscoder {
    type Metadata = String;

    fn format(&self, metadata: &String) -> String {
        metadata.clone()
    }
}
