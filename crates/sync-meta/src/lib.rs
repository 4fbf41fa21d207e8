//! Template metadata embedding for Campaign Sync
//!
//! Templates are stored on disk as XML with their metadata kept in one
//! marker comment:
//!
//! ```text
//! <!--!
//! Schema: xtk:jst
//! Name: cus:welcome
//! !-->
//! <jst>...</jst>
//! ```
//!
//! [`MetadataProcessor::extract_metadata`] splits such a file into a
//! [`Template`] (marker-free code plus decoded metadata) and
//! [`MetadataProcessor::insert_metadata`] writes it back. The payload format
//! is supplied by a [`MetadataParser`] / [`MetadataFormatter`] pair.

pub mod error;
pub mod marker;
pub mod processor;
pub mod template;
pub mod transcoder;

pub use error::{Error, Result};
pub use marker::MarkerScan;
pub use processor::MetadataProcessor;
pub use template::Template;
pub use transcoder::{
    InternalName, JsonMetadata, JsonTranscoder, KeyValueTranscoder, MetadataFormatError,
    MetadataFormatter, MetadataParser, RawTranscoder, TemplateMetadata,
};
