//! JSON object payloads

use serde_json::{Map, Value};

use super::{MetadataFormatError, MetadataFormatter, MetadataParser};

pub type JsonMetadata = Map<String, Value>;

/// Reads and writes the payload as a pretty-printed JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTranscoder;

impl MetadataParser for JsonTranscoder {
    type Metadata = JsonMetadata;

    fn parse(&self, raw: &str) -> Result<JsonMetadata, MetadataFormatError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl MetadataFormatter for JsonTranscoder {
    type Metadata = JsonMetadata;

    fn format(&self, metadata: &JsonMetadata) -> String {
        // Display on Value cannot fail; alternate mode pretty-prints
        format!("{:#}", Value::Object(metadata.clone()))
    }
}
