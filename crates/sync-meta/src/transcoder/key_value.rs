//! `Key: value` payloads describing a Campaign template

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::escape::{escape, find_separator, unescape};
use super::{MetadataFormatError, MetadataFormatter, MetadataParser};

const SCHEMA_KEY: &str = "Schema";
const NAME_KEY: &str = "Name";

/// A `namespace:name` identifier such as `nms:delivery`.
///
/// Both parts are non-empty and contain no `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternalName {
    namespace: Option<String>,
    name: String,
}

impl InternalName {
    pub fn new(namespace: Option<&str>, name: &str) -> Result<Self, MetadataFormatError> {
        let valid = |part: &str| !part.is_empty() && !part.contains(':');
        if !valid(name) || !namespace.is_none_or(valid) {
            let value = match namespace {
                Some(namespace) => format!("{namespace}:{name}"),
                None => name.to_string(),
            };
            return Err(MetadataFormatError::InvalidInternalName { value });
        }
        Ok(Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        })
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for InternalName {
    type Err = MetadataFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, name)) => Self::new(Some(namespace), name),
            None => Self::new(None, s),
        }
    }
}

impl TryFrom<String> for InternalName {
    type Error = MetadataFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InternalName> for String {
    fn from(name: InternalName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for InternalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}:{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Metadata stored alongside a template's code.
///
/// Extra properties are keyed by non-empty names other than `Schema` and
/// `Name` (in any letter case), which belong to the typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Schema the template belongs to, e.g. `xtk:jst`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<InternalName>,
    /// Name of the template itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<InternalName>,
    #[serde(default, deserialize_with = "deserialize_properties")]
    additional_properties: BTreeMap<String, String>,
}

impl TemplateMetadata {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.additional_properties.get(key).map(String::as_str)
    }

    /// Extra properties, such as a label, in key order
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.additional_properties
    }

    /// Set an extra property, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataFormatError::InvalidKey`] for an empty key or one
    /// that names a typed field.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, MetadataFormatError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(self.additional_properties.insert(key, value.into()))
    }

    /// Builder form of [`set_property`](Self::set_property)
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, MetadataFormatError> {
        self.set_property(key, value)?;
        Ok(self)
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.additional_properties.remove(key)
    }
}

fn validate_key(key: &str) -> Result<(), MetadataFormatError> {
    let reason = if key.is_empty() {
        "key is empty"
    } else if is_reserved(key) {
        "key is reserved for a typed field"
    } else {
        return Ok(());
    };
    Err(MetadataFormatError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

fn is_reserved(key: &str) -> bool {
    key.eq_ignore_ascii_case(SCHEMA_KEY) || key.eq_ignore_ascii_case(NAME_KEY)
}

fn deserialize_properties<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let properties = BTreeMap::<String, String>::deserialize(deserializer)?;
    for key in properties.keys() {
        validate_key(key).map_err(<D::Error as serde::de::Error>::custom)?;
    }
    Ok(properties)
}

/// Line-based `key: value` grammar.
///
/// - one entry per line, split at the first unescaped `:` or `=`
/// - blank lines are ignored, whitespace around keys and values is trimmed
/// - `Schema` and `Name` are matched case-insensitively and parsed as [`InternalName`]
/// - keys may appear once
/// - keys and values use backslash escapes (`\n`, `\:`, `\s`, ...) so that
///   formatting then parsing returns the same metadata
///
/// Line numbers in errors count from the start of the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueTranscoder;

impl MetadataParser for KeyValueTranscoder {
    type Metadata = TemplateMetadata;

    fn parse(&self, raw: &str) -> Result<TemplateMetadata, MetadataFormatError> {
        let mut metadata = TemplateMetadata::default();
        let mut seen = HashSet::new();

        for (index, line) in raw.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(sep) = find_separator(line) else {
                return Err(MetadataFormatError::MalformedLine {
                    line: line_number,
                    content: line.to_string(),
                });
            };
            let key = unescape(line[..sep].trim());
            let value = unescape(line[sep + 1..].trim());
            if key.is_empty() {
                return Err(MetadataFormatError::EmptyKey { line: line_number });
            }

            let slot = if is_reserved(&key) {
                key.to_ascii_lowercase()
            } else {
                key.clone()
            };
            if !seen.insert(slot.clone()) {
                return Err(MetadataFormatError::DuplicateKey {
                    line: line_number,
                    key,
                });
            }

            match slot.as_str() {
                "schema" => metadata.schema = Some(value.parse()?),
                "name" => metadata.name = Some(value.parse()?),
                _ => {
                    metadata.additional_properties.insert(key, value);
                }
            }
        }

        Ok(metadata)
    }
}

impl MetadataFormatter for KeyValueTranscoder {
    type Metadata = TemplateMetadata;

    fn format(&self, metadata: &TemplateMetadata) -> String {
        let mut lines = Vec::new();
        if let Some(schema) = &metadata.schema {
            lines.push(format!("{SCHEMA_KEY}: {}", escape(&schema.to_string(), false)));
        }
        if let Some(name) = &metadata.name {
            lines.push(format!("{NAME_KEY}: {}", escape(&name.to_string(), false)));
        }
        for (key, value) in &metadata.additional_properties {
            lines.push(format!("{}: {}", escape(key, true), escape(value, false)));
        }
        lines.join("\n")
    }
}
