//! BSON value to schema type name mapping.
//!
//! Names follow the vocabulary the HTML diagram understands: lower-case
//! primitives (`string`, `number`, `boolean`, `null`) and capitalized
//! object-like types (`ObjectId`, `Date`, `Object`, `Array`, ...).

use mongodb::bson::Bson;

/// Type name of an array value, as matched against `--array`.
pub const ARRAY_TYPE: &str = "Array";

/// Type name of an embedded document.
pub const OBJECT_TYPE: &str = "Object";

/// Type name of a missing or null value.
pub const NULL_TYPE: &str = "null";

/// Returns the schema type name for a BSON value.
pub fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::String(_) | Bson::Symbol(_) => "string",
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => "number",
        Bson::Decimal128(_) => "Decimal128",
        Bson::Boolean(_) => "boolean",
        Bson::DateTime(_) => "Date",
        Bson::Timestamp(_) => "Timestamp",
        Bson::ObjectId(_) => "ObjectId",
        Bson::Document(_) => OBJECT_TYPE,
        Bson::Array(_) => ARRAY_TYPE,
        Bson::Binary(_) => "Binary",
        Bson::RegularExpression(_) => "RegExp",
        Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => "Code",
        Bson::Null | Bson::Undefined => NULL_TYPE,
        _ => "unknown",
    }
}

/// Whether values of this type can reference another document's `_id`.
pub fn is_reference_type(type_name: &str) -> bool {
    matches!(type_name, "string" | "ObjectId")
}
