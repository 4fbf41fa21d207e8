//! Error types for sync-xml

/// Result type for sync-xml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, editing or configuring documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed XML at {row}:{col}: {message}")]
    Malformed { row: u32, col: u32, message: String },

    #[error("Comment text cannot contain \"--\": {text:?}")]
    InvalidComment { text: String },

    #[error("No node at {path}")]
    NodeNotFound { path: String },

    #[error("Invalid writer settings: {0}")]
    Settings(#[from] toml::de::Error),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        Self::Malformed {
            row: pos.row,
            col: pos.col,
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Whether this error means the input was not well-formed XML
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
