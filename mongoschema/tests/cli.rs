//! CLI-level tests: argument mapping, template lookup, and exit statuses.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use clap::Parser;
use mongoschema::{Cli, bundled_template_path, execute, exit_status, template_path};
use mongoschema_core::{
    ExtractionConfig, ExtractionResult, MongoSchemaError, RenderOutcome, Result, SchemaExtractor,
    TEMPLATE_MARKER,
};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FixedExtractor {
    calls: AtomicUsize,
}

impl FixedExtractor {
    const fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SchemaExtractor for FixedExtractor {
    async fn extract(
        &self,
        _connection: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExtractionResult::new(json!({
            "widgets": { "_id": { "type": "ObjectId", "primaryKey": true } },
            "limit": config.limit
        })))
    }
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["extract-mongo-schema"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn test_bundled_template_has_single_marker() {
    let template = std::fs::read_to_string(bundled_template_path()).unwrap();
    assert_eq!(template.matches(TEMPLATE_MARKER).count(), 1);
}

#[test]
fn test_explicit_template_path_wins() {
    let explicit = Path::new("/opt/custom/diagram.html");
    assert_eq!(template_path(Some(explicit)), explicit);
}

#[test]
fn test_default_template_path_points_at_template_file() {
    let path = template_path(None);
    assert!(path.ends_with("template-html-diagram.html"));
    assert!(path.is_file());
}

#[tokio::test]
async fn test_missing_database_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.json");
    let cli = parse(&["-o", output.to_str().unwrap()]);
    let extractor = FixedExtractor::new();

    let outcome = execute(&cli, &extractor).await;

    assert_eq!(exit_status(&outcome), 1);
    assert!(outcome.as_ref().is_err_and(MongoSchemaError::wants_usage));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_output_exits_non_zero() {
    let cli = parse(&["-d", "mongodb://localhost/app"]);
    let extractor = FixedExtractor::new();

    let outcome = execute(&cli, &extractor).await;

    assert_eq!(exit_status(&outcome), 1);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_output_directory_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let cli = parse(&["-d", "mongodb://localhost/app", "-o", dir.path().to_str().unwrap()]);
    let extractor = FixedExtractor::new();

    let outcome = execute(&cli, &extractor).await;

    assert!(matches!(
        outcome,
        Err(MongoSchemaError::InvalidOutputTarget { .. })
    ));
    assert_eq!(exit_status(&outcome), 1);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_json_output_with_default_limit() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.json");
    let cli = parse(&["-d", "mongodb://localhost/app", "-o", output.to_str().unwrap()]);

    let outcome = execute(&cli, &FixedExtractor::new()).await;

    assert_eq!(exit_status(&outcome), 0);
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["limit"], json!(100));
}

#[tokio::test]
async fn test_html_diagram_with_template_override() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("custom.html");
    std::fs::write(&template, "<pre>{/*DATA_HERE*/}</pre>").unwrap();
    let output = dir.path().join("diagram.html");
    let cli = parse(&[
        "-d",
        "mongodb://localhost/app",
        "-o",
        output.to_str().unwrap(),
        "-f",
        "html-diagram",
        "-l",
        "7",
        "--template",
        template.to_str().unwrap(),
    ]);

    let outcome = execute(&cli, &FixedExtractor::new()).await;

    assert_eq!(outcome.unwrap(), RenderOutcome::Written(output.clone()));
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<pre>{\n\t\"widgets\""));
    assert!(written.ends_with("\"limit\": 7\n}</pre>"));
}

#[tokio::test]
async fn test_html_diagram_with_bundled_template() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("diagram.html");
    let cli = parse(&[
        "-d",
        "mongodb://localhost/app",
        "-o",
        output.to_str().unwrap(),
        "-f",
        "html-diagram",
        "--template",
        bundled_template_path().to_str().unwrap(),
    ]);

    execute(&cli, &FixedExtractor::new()).await.unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("var schema = {\n\t\"widgets\""));
    assert!(!written.contains(TEMPLATE_MARKER));
    assert!(written.trim_end().ends_with("</html>"));
}

#[tokio::test]
async fn test_unrecognized_format_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schema.xml");
    let cli = parse(&[
        "-d",
        "mongodb://localhost/app",
        "-o",
        output.to_str().unwrap(),
        "-f",
        "xml",
    ]);

    let outcome = execute(&cli, &FixedExtractor::new()).await;

    assert_eq!(exit_status(&outcome), 0);
    assert_eq!(outcome.unwrap(), RenderOutcome::Skipped);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_template_without_marker_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t.html");
    std::fs::write(&template, "<html>no marker</html>").unwrap();
    let output = dir.path().join("diagram.html");
    let cli = parse(&[
        "-d",
        "mongodb://localhost/app",
        "-o",
        output.to_str().unwrap(),
        "-f",
        "html-diagram",
        "--template",
        template.to_str().unwrap(),
    ]);

    let outcome = execute(&cli, &FixedExtractor::new()).await;

    assert_eq!(exit_status(&outcome), 0);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "<html>no marker</html>"
    );
}
