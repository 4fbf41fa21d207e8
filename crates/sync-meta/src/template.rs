//! Template code paired with its metadata

use serde::{Deserialize, Serialize};

/// Marker-free document text plus the metadata that travels with it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template<M> {
    pub code: String,
    pub metadata: M,
}

impl<M> Template<M> {
    pub fn new(code: impl Into<String>, metadata: M) -> Self {
        Self {
            code: code.into(),
            metadata,
        }
    }
}
