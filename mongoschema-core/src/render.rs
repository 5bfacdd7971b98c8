//! Rendering of extraction results to the output file.
//!
//! Both formats share one serialization: pretty-printed JSON indented with a
//! single tab per level. `html-diagram` additionally splices that text into
//! a static template at [`TEMPLATE_MARKER`].

use crate::config::OutputFormat;
use crate::error::MongoSchemaError;
use crate::extractor::ExtractionResult;
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Literal token in the HTML template that receives the serialized schema.
pub const TEMPLATE_MARKER: &str = "{/*DATA_HERE*/}";

/// File name of the HTML template shipped next to the binary.
pub const TEMPLATE_FILE_NAME: &str = "template-html-diagram.html";

/// What the renderer did with the output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The artifact was written to this path
    Written(PathBuf),
    /// The format was not recognized and nothing was written
    Skipped,
}

/// Serializes a result as JSON indented with tabs.
pub fn to_pretty_json(result: &ExtractionResult) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result
        .serialize(&mut serializer)
        .map_err(|e| MongoSchemaError::Serialization {
            context: "extraction result".to_string(),
            source: e,
        })?;

    String::from_utf8(buf).map_err(|e| {
        MongoSchemaError::configuration(format!("Serialized schema is not valid UTF-8: {}", e))
    })
}

/// Replaces the first [`TEMPLATE_MARKER`] in `template` with `json`.
///
/// The replacement is literal. Returns `None` when the marker is absent.
pub fn embed_in_template(template: &str, json: &str) -> Option<String> {
    template
        .contains(TEMPLATE_MARKER)
        .then(|| template.replacen(TEMPLATE_MARKER, json, 1))
}

/// Renders `result` in `format` and writes it to `output`.
///
/// `template` is only read for [`OutputFormat::HtmlDiagram`]; it is read
/// before the output is touched, so a template fault leaves any existing
/// output file as it was.
///
/// A template without the marker is written out as is.
///
/// # Errors
/// - `TemplateRead` when the template is missing or unreadable
/// - `Write` when the output cannot be written
pub async fn render(
    result: &ExtractionResult,
    format: &OutputFormat,
    output: &Path,
    template: &Path,
) -> Result<RenderOutcome> {
    let artifact = match format {
        OutputFormat::Json => to_pretty_json(result)?,
        OutputFormat::HtmlDiagram => {
            let template_html = read_template(template).await?;
            let json = to_pretty_json(result)?;
            embed_in_template(&template_html, &json).unwrap_or_else(|| {
                tracing::warn!(
                    "Template {} has no {} marker; writing it unchanged",
                    template.display(),
                    TEMPLATE_MARKER
                );
                template_html
            })
        }
        OutputFormat::Unrecognized(value) => {
            tracing::warn!(
                "Unrecognized output format \"{}\"; nothing was written",
                value
            );
            return Ok(RenderOutcome::Skipped);
        }
    };

    write_output(output, &artifact).await?;
    tracing::info!("✓ Wrote {} output to {}", format, output.display());
    Ok(RenderOutcome::Written(output.to_path_buf()))
}

/// Reads the HTML template.
pub async fn read_template(path: &Path) -> Result<String> {
    tracing::debug!("Reading template {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MongoSchemaError::template_read(path, e))
}

/// Writes (truncating) the artifact to `output`.
pub async fn write_output(output: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(output, contents)
        .await
        .map_err(|e| MongoSchemaError::write_failed(output, e))
}
