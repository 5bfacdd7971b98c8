//! Reference MongoDB collaborator.
//!
//! # Module Structure
//! - `connection`: client creation
//! - `type_mapping`: BSON value to schema type name
//! - `schema_inference`: per-collection field statistics
//!
//! # Extraction
//! For every selected collection, up to `limit` documents are sampled and
//! merged into a field map. Reference-typed top-level fields are then probed
//! against the `_id` of every collection; a hit marks the field as a foreign
//! key unless the exclusion map suppresses it. All operations are read-only.

pub mod connection;
pub mod schema_inference;
pub mod type_mapping;

use crate::Result;
use crate::config::ExtractionConfig;
use crate::error::MongoSchemaError;
use crate::extractor::{ExtractionResult, SchemaExtractor};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use schema_inference::SchemaInferrer;
use serde_json::{Map, Value};
use type_mapping::ARRAY_TYPE;

pub use connection::connect;

/// Extracts a schema description from a live MongoDB database.
///
/// # Example
/// ```rust,ignore
/// use mongoschema_core::mongo::MongoExtractor;
/// use mongoschema_core::{ExtractionConfig, SchemaExtractor};
///
/// let schema = MongoExtractor
///     .extract("mongodb://localhost:27017/app", &ExtractionConfig::default())
///     .await?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoExtractor;

#[async_trait]
impl SchemaExtractor for MongoExtractor {
    async fn extract(
        &self,
        connection: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let (client, database_name) = connect(connection).await?;
        let db = client.database(&database_name);

        let all_collections = list_collections(&db).await?;
        let selected = select_collections(&all_collections, config.collection_list.as_deref());

        tracing::info!(
            "Analyzing {} of {} collections in database '{}'",
            selected.len(),
            all_collections.len(),
            database_name
        );

        let analyze_arrays = analyzes_arrays(config.array_list.as_deref());
        let mut schema = Map::new();

        for collection in selected {
            let inferrer = sample_collection(&db, &collection, config.limit, analyze_arrays).await?;
            tracing::debug!(
                "Sampled {} documents from '{}'",
                inferrer.documents_sampled(),
                collection
            );

            let mut fields = inferrer.to_json(config.raw);
            for (field, value) in inferrer.foreign_key_candidates() {
                if config.dont_follow_fk.is_excluded(&collection, &field) {
                    tracing::debug!("Not following foreign key {}.{}", collection, field);
                    continue;
                }
                if let Some(target) = find_referenced_collection(&db, &all_collections, value).await?
                    && let Some(Value::Object(entry)) = fields.get_mut(&field)
                {
                    tracing::debug!("{}.{} references '{}'", collection, field, target);
                    entry.insert("foreignKey".to_string(), Value::Bool(true));
                    entry.insert("references".to_string(), Value::String(target));
                }
            }

            schema.insert(collection, Value::Object(fields));
        }

        Ok(ExtractionResult::new(Value::Object(schema)))
    }
}

/// Whether array elements are analyzed for the given `--array` list.
///
/// Without a list arrays are analyzed; with one, only if it names `Array`.
pub fn analyzes_arrays(array_list: Option<&[String]>) -> bool {
    array_list.is_none_or(|list| list.iter().any(|name| name == ARRAY_TYPE))
}

/// Applies the collection filter, keeping the order of `collection_list`
/// and dropping names the database does not have.
pub fn select_collections(available: &[String], collection_list: Option<&[String]>) -> Vec<String> {
    match collection_list {
        None => available.to_vec(),
        Some(requested) => requested
            .iter()
            .filter(|name| {
                let present = available.contains(*name);
                if !present {
                    tracing::warn!("Collection '{}' not found; skipping", name);
                }
                present
            })
            .cloned()
            .collect(),
    }
}

/// Lists user collections, sorted by name.
async fn list_collections(db: &Database) -> Result<Vec<String>> {
    let mut names = db
        .list_collection_names()
        .await
        .map_err(|e| MongoSchemaError::extraction_failed("Failed to list collections", e))?;
    names.retain(|name| !name.starts_with("system."));
    names.sort();
    Ok(names)
}

async fn sample_collection(
    db: &Database,
    collection: &str,
    limit: u32,
    analyze_arrays: bool,
) -> Result<SchemaInferrer> {
    let sample_err = |e: mongodb::error::Error| {
        MongoSchemaError::extraction_failed(
            format!("Failed to sample documents from '{}'", collection),
            e,
        )
    };

    let mut cursor = db
        .collection::<Document>(collection)
        .find(doc! {})
        .limit(i64::from(limit))
        .await
        .map_err(sample_err)?;

    let mut inferrer = SchemaInferrer::new(analyze_arrays);
    while let Some(document) = cursor.try_next().await.map_err(sample_err)? {
        inferrer.analyze_document(&document);
    }

    Ok(inferrer)
}

/// Returns the first collection holding a document whose `_id` equals `value`.
async fn find_referenced_collection(
    db: &Database,
    collections: &[String],
    value: Bson,
) -> Result<Option<String>> {
    let filter = doc! { "_id": value };
    for candidate in collections {
        let hits = db
            .collection::<Document>(candidate)
            .count_documents(filter.clone())
            .limit(1)
            .await
            .map_err(|e| {
                MongoSchemaError::extraction_failed(
                    format!("Failed to probe '{}' for referenced documents", candidate),
                    e,
                )
            })?;
        if hits > 0 {
            return Ok(Some(candidate.clone()));
        }
    }
    Ok(None)
}
