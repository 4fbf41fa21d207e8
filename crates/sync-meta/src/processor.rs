//! Embedding metadata into XML documents and extracting it again

use sync_xml::{WriterSettings, XmlDocument};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::marker::{self, MarkerScan};
use crate::template::Template;
use crate::transcoder::{KeyValueTranscoder, MetadataFormatter, MetadataParser};

/// Moves metadata between a [`Template`] and a single marker comment in XML.
///
/// Holds no per-document state: every call parses its own tree and drops it
/// after serializing, so one processor can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MetadataProcessor<P, F> {
    parser: P,
    formatter: F,
    settings: WriterSettings,
}

impl<P, F> MetadataProcessor<P, F> {
    pub fn new(parser: P, formatter: F) -> Self {
        Self {
            parser,
            formatter,
            settings: WriterSettings::default(),
        }
    }

    /// Use `settings` for serialized output and for the marker's line breaks
    pub fn with_settings(mut self, settings: WriterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }
}

impl MetadataProcessor<KeyValueTranscoder, KeyValueTranscoder> {
    /// Processor for `Key: value` template metadata
    pub fn key_value() -> Self {
        Self::new(KeyValueTranscoder, KeyValueTranscoder)
    }
}

impl<P, F, M> MetadataProcessor<P, F>
where
    P: MetadataParser<Metadata = M>,
    F: MetadataFormatter<Metadata = M>,
    M: Default,
{
    /// Split raw XML into marker-free code and decoded metadata.
    ///
    /// A document without a marker yields `M::default()` and its code
    /// unchanged apart from formatting.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDocument`] if `input` is not well-formed XML
    /// - [`Error::MultipleMetadata`] if more than one comment is a marker;
    ///   nothing is decoded in that case
    /// - [`Error::MetadataFormat`] if the parser rejects the payload
    ///
    /// # Example
    /// ```
    /// use sync_meta::MetadataProcessor;
    ///
    /// let processor = MetadataProcessor::key_value();
    /// let template = processor
    ///     .extract_metadata("<!--!\nSchema: xtk:jst\n!--><root/>")
    ///     .unwrap();
    /// assert_eq!(template.code, "<root />");
    /// assert_eq!(template.metadata.schema.unwrap().to_string(), "xtk:jst");
    /// ```
    pub fn extract_metadata(&self, input: &str) -> Result<Template<M>> {
        let mut doc = XmlDocument::parse(input).map_err(Error::MalformedDocument)?;

        let metadata = match marker::scan_markers(&doc) {
            MarkerScan::None => {
                debug!("No metadata comment found, using defaults");
                M::default()
            }
            MarkerScan::Found { path, payload } => {
                debug!(%path, "Found metadata comment");
                doc.remove_node(&path)?;
                self.parser.parse(&payload)?
            }
            MarkerScan::Multiple { count } => {
                warn!(count, "Refusing to pick between multiple metadata comments");
                return Err(Error::MultipleMetadata { count });
            }
        };

        Ok(Template {
            code: doc.to_xml_string(&self.settings),
            metadata,
        })
    }

    /// Produce raw XML with `input.metadata` in a marker comment at the top.
    ///
    /// The marker becomes the first node of the document; only an XML
    /// declaration, when the code has one, is written before it.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDocument`] if `input.code` is not well-formed XML
    /// - [`Error::Document`] if the formatted payload cannot be written as a
    ///   comment (it contains `--`)
    pub fn insert_metadata(&self, input: &Template<M>) -> Result<String> {
        let payload = self.formatter.format(&input.metadata);
        let comment = marker::wrap(&payload, self.settings.line_ending);

        let mut doc = XmlDocument::parse(&input.code).map_err(Error::MalformedDocument)?;
        doc.prepend_comment(comment)?;
        debug!(payload_len = payload.len(), "Inserted metadata comment");

        Ok(doc.to_xml_string(&self.settings))
    }
}
