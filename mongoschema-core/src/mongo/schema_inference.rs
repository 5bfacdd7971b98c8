//! Schema inference from sampled documents.
//!
//! Each field keeps a count per observed type, the first non-null value
//! (used for foreign key lookups), the nested structure of embedded
//! documents, and, when array analysis is enabled, the merged statistics of
//! array elements.

use super::type_mapping::{NULL_TYPE, bson_type_name, is_reference_type};
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Statistics about one field (or one array element slot).
#[derive(Debug, Clone, Default)]
struct FieldStats {
    /// Count of each type observed
    type_counts: HashMap<&'static str, u32>,
    /// Position when the field was first seen
    first_seen_position: u32,
    /// First non-null value
    sample_value: Option<Bson>,
    /// Fields of embedded documents
    structure: Option<Box<SchemaInferrer>>,
    /// Merged statistics of array elements
    items: Option<Box<FieldStats>>,
}

impl FieldStats {
    fn record(&mut self, value: &Bson, analyze_arrays: bool) {
        let type_name = bson_type_name(value);
        let count = self.type_counts.entry(type_name).or_insert(0);
        *count = count.saturating_add(1);

        if self.sample_value.is_none() && !matches!(value, Bson::Null | Bson::Undefined) {
            self.sample_value = Some(value.clone());
        }

        match value {
            Bson::Document(doc) => self
                .structure
                .get_or_insert_with(|| Box::new(SchemaInferrer::new(analyze_arrays)))
                .analyze_document(doc),
            Bson::Array(elements) if analyze_arrays => {
                let items = self.items.get_or_insert_with(Box::default);
                for element in elements {
                    items.record(element, analyze_arrays);
                }
            }
            _ => {}
        }
    }

    /// Most frequent non-null type; `null` only when nothing else was seen.
    /// Ties resolve to the alphabetically first name.
    fn dominant_type(&self) -> &'static str {
        self.type_counts
            .iter()
            .filter(|(name, _)| **name != NULL_TYPE)
            .max_by(|(a_name, a_count), (b_name, b_count)| {
                a_count.cmp(b_count).then_with(|| b_name.cmp(a_name))
            })
            .map_or(NULL_TYPE, |(name, _)| *name)
    }

    fn to_json(&self, raw: bool) -> Value {
        let mut out = Map::new();

        if raw {
            let mut types: Vec<(&&'static str, &u32)> = self.type_counts.iter().collect();
            types.sort_by(|(a_name, a_count), (b_name, b_count)| {
                b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
            });
            let types: Map<String, Value> = types
                .into_iter()
                .map(|(name, count)| ((*name).to_string(), json!(count)))
                .collect();
            out.insert("types".to_string(), Value::Object(types));
        } else {
            out.insert("type".to_string(), json!(self.dominant_type()));
        }

        if let Some(structure) = &self.structure {
            out.insert(
                "structure".to_string(),
                Value::Object(structure.to_json(raw)),
            );
        }

        if let Some(items) = &self.items {
            out.insert("items".to_string(), items.to_json(raw));
        }

        Value::Object(out)
    }
}

/// Analyzes documents of one collection to discover their schema.
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    fields: HashMap<String, FieldStats>,
    next_position: u32,
    document_count: u32,
    analyze_arrays: bool,
}

impl SchemaInferrer {
    /// Creates an empty inferrer.
    ///
    /// # Arguments
    /// * `analyze_arrays` - Whether array elements are analyzed as well
    pub fn new(analyze_arrays: bool) -> Self {
        Self {
            fields: HashMap::new(),
            next_position: 1,
            document_count: 0,
            analyze_arrays,
        }
    }

    /// Adds one document to the statistics.
    pub fn analyze_document(&mut self, doc: &Document) {
        self.document_count = self.document_count.saturating_add(1);

        for (key, value) in doc {
            let next_position = &mut self.next_position;
            let stats = self.fields.entry(key.clone()).or_insert_with(|| {
                let pos = *next_position;
                *next_position = next_position.saturating_add(1);
                FieldStats {
                    first_seen_position: pos,
                    ..FieldStats::default()
                }
            });
            stats.record(value, self.analyze_arrays);
        }
    }

    /// Number of documents analyzed.
    pub const fn documents_sampled(&self) -> u32 {
        self.document_count
    }

    /// Renders the inferred fields in first-seen order.
    ///
    /// In raw mode each field lists every type with its frequency; otherwise
    /// only the dominant type is given. `_id` is flagged as primary key.
    pub fn to_json(&self, raw: bool) -> Map<String, Value> {
        let mut ordered: Vec<(&String, &FieldStats)> = self.fields.iter().collect();
        ordered.sort_by_key(|(_, stats)| stats.first_seen_position);

        ordered
            .into_iter()
            .map(|(name, stats)| {
                let mut value = stats.to_json(raw);
                if name == "_id"
                    && let Value::Object(obj) = &mut value
                {
                    obj.insert("primaryKey".to_string(), Value::Bool(true));
                }
                (name.clone(), value)
            })
            .collect()
    }

    /// Top-level fields whose dominant type can hold a reference, with the
    /// first sampled value. `_id` is never a candidate.
    pub fn foreign_key_candidates(&self) -> Vec<(String, Bson)> {
        let mut candidates: Vec<(u32, String, Bson)> = self
            .fields
            .iter()
            .filter(|(name, _)| name.as_str() != "_id")
            .filter(|(_, stats)| is_reference_type(stats.dominant_type()))
            .filter_map(|(name, stats)| {
                stats
                    .sample_value
                    .clone()
                    .map(|v| (stats.first_seen_position, name.clone(), v))
            })
            .collect();
        candidates.sort_by_key(|(pos, _, _)| *pos);
        candidates
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .collect()
    }
}
