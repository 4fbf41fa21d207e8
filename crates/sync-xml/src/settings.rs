//! Writer settings for serialized documents

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Line terminator used between serialized nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Formatting applied when a document is written back to text.
///
/// Can be embedded in a host tool's TOML configuration:
///
/// ```
/// use sync_xml::{LineEnding, WriterSettings};
///
/// let settings = WriterSettings::from_toml_str("indent = \"\\t\"\nline_ending = \"crlf\"").unwrap();
/// assert_eq!(settings.indent, "\t");
/// assert_eq!(settings.line_ending, LineEnding::CrLf);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterSettings {
    /// Text repeated once per nesting level
    #[serde(default = "default_indent")]
    pub indent: String,
    #[serde(default)]
    pub line_ending: LineEnding,
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            line_ending: LineEnding::default(),
        }
    }
}

impl WriterSettings {
    /// Load settings from TOML, filling in defaults for missing keys
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let settings = WriterSettings::from_toml_str("").unwrap();
        assert_eq!(settings, WriterSettings::default());
        assert_eq!(settings.indent, "  ");
        assert_eq!(settings.line_ending.as_str(), "\n");
    }

    #[test]
    fn unknown_line_ending_is_rejected() {
        let err = WriterSettings::from_toml_str("line_ending = \"cr\"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid writer settings"));
    }
}
