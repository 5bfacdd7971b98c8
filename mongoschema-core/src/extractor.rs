//! The extraction seam and its single-call invoker.
//!
//! Schema extraction itself (connecting, sampling, type inference, foreign
//! key detection) lives behind [`SchemaExtractor`]. The pipeline only needs a
//! connection string in and an opaque structured value out.

use crate::config::ExtractionConfig;
use crate::error::redact_database_url;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque result of an extraction: usually collection name -> schema.
///
/// The pipeline never looks inside; it is serialized as-is, keeping the key
/// order the collaborator produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult(serde_json::Value);

impl ExtractionResult {
    /// Wraps a structured value.
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrows the underlying value.
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwraps the underlying value.
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for ExtractionResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Collaborator that turns a database into a schema description.
///
/// # Object Safety
/// Usable as `Box<dyn SchemaExtractor>` or `&dyn SchemaExtractor`.
#[async_trait]
pub trait SchemaExtractor: Send + Sync {
    /// Extracts the schema reachable through `connection`.
    ///
    /// # Errors
    /// Any failure (connectivity, authentication, or internal) is returned
    /// as-is and is terminal for the run.
    async fn extract(&self, connection: &str, config: &ExtractionConfig)
    -> Result<ExtractionResult>;
}

/// Calls the collaborator exactly once and awaits it.
///
/// Failures are logged with a redacted target and passed through unchanged;
/// nothing is retried.
pub async fn invoke<E>(
    extractor: &E,
    connection: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionResult>
where
    E: SchemaExtractor + ?Sized,
{
    tracing::info!("Extracting schema from {}", redact_database_url(connection));
    tracing::debug!(
        "Extraction limit={} raw={} collections={:?}",
        config.limit,
        config.raw,
        config.collection_list
    );

    match extractor.extract(connection, config).await {
        Ok(result) => {
            tracing::info!("✓ Schema extraction completed");
            Ok(result)
        }
        Err(e) => {
            tracing::error!("Schema extraction failed: {}", e);
            Err(e)
        }
    }
}
