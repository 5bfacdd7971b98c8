//! Sequential driver: resolve, extract once, render.

use crate::config::{RawOptions, resolve};
use crate::extractor::{SchemaExtractor, invoke};
use crate::render::{RenderOutcome, render};
use crate::Result;
use std::path::Path;

/// Runs the whole pipeline for one invocation.
///
/// Validation happens before the collaborator is called, and the output file
/// is only touched after extraction succeeded.
///
/// # Errors
/// Returns the first failure from resolution, extraction, or rendering.
pub async fn run<E>(raw: RawOptions, extractor: &E, template: &Path) -> Result<RenderOutcome>
where
    E: SchemaExtractor + ?Sized,
{
    let options = resolve(raw)?;
    tracing::info!("Output: {} ({})", options.output.display(), options.format);

    let result = invoke(extractor, &options.connection, &options.extraction).await?;

    render(&result, &options.format, &options.output, template).await
}
