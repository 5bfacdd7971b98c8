//! Core library for extract-mongo-schema.
//!
//! Turns command-line values into an extraction configuration, hands it to a
//! [`SchemaExtractor`] exactly once, and writes the result either as
//! tab-indented JSON or embedded in a static HTML diagram template.
//!
//! # Architecture
//! - [`exclusion`]: `--dont-follow-fk` tokens to a two-level lookup
//! - [`config`]: raw options to a validated, defaulted configuration
//! - [`extractor`]: the collaborator trait and its single-call invoker
//! - [`render`]: JSON and HTML-template output
//! - [`pipeline`]: the sequence of the above
//! - `mongo` (feature `mongodb`): a reference MongoDB collaborator

pub mod config;
pub mod error;
pub mod exclusion;
pub mod extractor;
pub mod logging;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use config::{
    DEFAULT_SAMPLE_LIMIT, ExtractionConfig, OutputFormat, RawOptions, ResolvedOptions, resolve,
};
pub use error::{MongoSchemaError, Result};
pub use exclusion::{ExclusionMap, WILDCARD_KEY};
pub use extractor::{ExtractionResult, SchemaExtractor};
pub use logging::init_logging;
pub use render::{RenderOutcome, TEMPLATE_FILE_NAME, TEMPLATE_MARKER};
