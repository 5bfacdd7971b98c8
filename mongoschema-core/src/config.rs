//! Resolution of raw CLI values into the extraction configuration.
//!
//! [`resolve`] is a pure transform from [`RawOptions`] to [`ResolvedOptions`]:
//! it validates required inputs, normalizes the comma lists, applies
//! defaults, and builds the [`ExclusionMap`]. The only side effect is a
//! metadata lookup on the output path.

use crate::error::MongoSchemaError;
use crate::exclusion::ExclusionMap;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Documents sampled per collection when `--limit` is not given.
pub const DEFAULT_SAMPLE_LIMIT: u32 = 100;

/// Unprocessed values as supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// Database connection string
    pub database: Option<String>,
    /// Destination file
    pub output: Option<PathBuf>,
    /// Output format name
    pub format: Option<String>,
    /// Comma-separated collection names
    pub collection: Option<String>,
    /// Comma-separated array type names
    pub array: Option<String>,
    /// Emit full type-frequency detail
    pub raw: bool,
    /// Maximum documents sampled per collection
    pub limit: Option<u32>,
    /// `field` or `collection:field` tokens
    pub dont_follow_fk: Vec<String>,
}

/// Output format selected with `--format`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-indented JSON
    #[default]
    Json,
    /// JSON embedded in the static HTML diagram template
    HtmlDiagram,
    /// Any other value; rendering writes nothing
    Unrecognized(String),
}

impl From<&str> for OutputFormat {
    fn from(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            "html-diagram" => Self::HtmlDiagram,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::HtmlDiagram => write!(f, "html-diagram"),
            Self::Unrecognized(value) => write!(f, "{}", value),
        }
    }
}

/// Parameters handed to the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// Collections to analyze; `None` means all of them
    pub collection_list: Option<Vec<String>>,
    /// Array type names to analyze; `None` means the collaborator's default
    pub array_list: Option<Vec<String>>,
    /// Report every observed type with its frequency
    pub raw: bool,
    /// Maximum documents sampled per collection
    pub limit: u32,
    /// Foreign keys that must not be followed
    #[serde(rename = "dontFollowFK")]
    pub dont_follow_fk: ExclusionMap,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            collection_list: None,
            array_list: None,
            raw: false,
            limit: DEFAULT_SAMPLE_LIMIT,
            dont_follow_fk: ExclusionMap::new(),
        }
    }
}

/// Everything the pipeline needs after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Database connection string (never log without redaction)
    pub connection: String,
    /// Destination file
    pub output: PathBuf,
    /// Selected output format
    pub format: OutputFormat,
    /// Collaborator configuration
    pub extraction: ExtractionConfig,
}

/// Splits a comma-separated list; absent input stays absent.
pub fn split_list(value: Option<&str>) -> Option<Vec<String>> {
    value.map(|v| v.split(',').map(str::to_string).collect())
}

/// Validates and normalizes raw options.
///
/// # Errors
/// - `MissingInput` when the connection string or output path is absent or empty
/// - `InvalidOutputTarget` when the output path is an existing directory
pub fn resolve(raw: RawOptions) -> Result<ResolvedOptions> {
    let connection = raw
        .database
        .filter(|d| !d.is_empty())
        .ok_or_else(|| MongoSchemaError::missing_input("Database connection string"))?;

    let output = raw
        .output
        .filter(|o| !o.as_os_str().is_empty())
        .ok_or_else(|| MongoSchemaError::missing_input("Output path"))?;

    // A final symlink is not followed, so a link to a directory is accepted
    // here and fails later at write time.
    if let Ok(metadata) = std::fs::symlink_metadata(&output)
        && metadata.is_dir()
    {
        return Err(MongoSchemaError::invalid_output_target(output));
    }

    let format = raw
        .format
        .as_deref()
        .filter(|f| !f.is_empty())
        .map(OutputFormat::from)
        .unwrap_or_default();

    let extraction = ExtractionConfig {
        collection_list: split_list(raw.collection.as_deref().filter(|c| !c.is_empty())),
        array_list: split_list(raw.array.as_deref().filter(|a| !a.is_empty())),
        raw: raw.raw,
        limit: raw.limit.unwrap_or(DEFAULT_SAMPLE_LIMIT),
        dont_follow_fk: ExclusionMap::from_tokens(&raw.dont_follow_fk),
    };

    tracing::debug!(
        "Resolved options: format={}, limit={}, raw={}, collections={:?}, arrays={:?}",
        format,
        extraction.limit,
        extraction.raw,
        extraction.collection_list,
        extraction.array_list
    );

    Ok(ResolvedOptions {
        connection,
        output,
        format,
        extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::WILDCARD_KEY;

    fn minimal(output: PathBuf) -> RawOptions {
        RawOptions {
            database: Some("mongodb://localhost:27017/app".to_string()),
            output: Some(output),
            ..RawOptions::default()
        }
    }

    #[test]
    fn test_missing_database() {
        let raw = RawOptions {
            output: Some(PathBuf::from("schema.json")),
            ..RawOptions::default()
        };
        let err = resolve(raw).unwrap_err();
        assert!(matches!(err, MongoSchemaError::MissingInput { .. }));
        assert!(err.to_string().contains("Database connection string"));
    }

    #[test]
    fn test_missing_output() {
        let raw = RawOptions {
            database: Some("mongodb://localhost/app".to_string()),
            ..RawOptions::default()
        };
        let err = resolve(raw).unwrap_err();
        assert!(matches!(err, MongoSchemaError::MissingInput { .. }));
        assert!(err.to_string().contains("Output path"));
    }

    #[test]
    fn test_database_checked_before_output() {
        let err = resolve(RawOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Database connection string"));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let raw = RawOptions {
            database: Some(String::new()),
            output: Some(PathBuf::from("schema.json")),
            ..RawOptions::default()
        };
        assert!(matches!(
            resolve(raw),
            Err(MongoSchemaError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_output_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(minimal(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, MongoSchemaError::InvalidOutputTarget { .. }));
    }

    #[test]
    fn test_existing_output_file_accepted() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve(minimal(file.path().to_path_buf())).unwrap();
        assert_eq!(resolved.output, file.path());
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve(minimal(PathBuf::from("schema.json"))).unwrap();

        assert_eq!(resolved.format, OutputFormat::Json);
        assert_eq!(resolved.extraction.limit, DEFAULT_SAMPLE_LIMIT);
        assert_eq!(resolved.extraction.limit, 100);
        assert!(!resolved.extraction.raw);
        assert_eq!(resolved.extraction.collection_list, None);
        assert_eq!(resolved.extraction.array_list, None);
        assert!(
            resolved
                .extraction
                .dont_follow_fk
                .fields(WILDCARD_KEY)
                .is_some()
        );
    }

    #[test]
    fn test_lists_are_split_in_order() {
        let raw = RawOptions {
            collection: Some("a,b".to_string()),
            array: Some("Uint8Array,ArrayBuffer,Array".to_string()),
            ..minimal(PathBuf::from("schema.json"))
        };
        let resolved = resolve(raw).unwrap();

        assert_eq!(
            resolved.extraction.collection_list,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            resolved.extraction.array_list,
            Some(vec![
                "Uint8Array".to_string(),
                "ArrayBuffer".to_string(),
                "Array".to_string()
            ])
        );
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let raw = RawOptions {
            format: Some("html-diagram".to_string()),
            raw: true,
            limit: Some(5),
            dont_follow_fk: vec!["ownerId".to_string(), "posts:authorId".to_string()],
            ..minimal(PathBuf::from("diagram.html"))
        };
        let resolved = resolve(raw).unwrap();

        assert_eq!(resolved.format, OutputFormat::HtmlDiagram);
        assert!(resolved.extraction.raw);
        assert_eq!(resolved.extraction.limit, 5);
        assert!(resolved.extraction.dont_follow_fk.is_excluded("users", "ownerId"));
        assert!(resolved.extraction.dont_follow_fk.is_excluded("posts", "authorId"));
        assert!(!resolved.extraction.dont_follow_fk.is_excluded("users", "authorId"));
    }

    #[test]
    fn test_unrecognized_format_is_preserved() {
        let raw = RawOptions {
            format: Some("yaml".to_string()),
            ..minimal(PathBuf::from("schema.yaml"))
        };
        let resolved = resolve(raw).unwrap();
        assert_eq!(
            resolved.format,
            OutputFormat::Unrecognized("yaml".to_string())
        );
        assert_eq!(resolved.format.to_string(), "yaml");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(None), None);
        assert_eq!(split_list(Some("one")), Some(vec!["one".to_string()]));
        assert_eq!(
            split_list(Some("a,,b")),
            Some(vec!["a".to_string(), String::new(), "b".to_string()])
        );
    }

    #[test]
    fn test_config_serializes_with_collaborator_names() {
        let config = ExtractionConfig {
            collection_list: Some(vec!["users".to_string()]),
            ..ExtractionConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["collectionList"], serde_json::json!(["users"]));
        assert_eq!(value["limit"], serde_json::json!(100));
        assert_eq!(value["dontFollowFK"], serde_json::json!({ "__ANY__": {} }));
    }
}
