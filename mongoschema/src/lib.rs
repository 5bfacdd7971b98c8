//! Library side of the `extract-mongo-schema` binary.
//!
//! Exposes the CLI definition, template lookup, and the run/report helpers
//! so they can be tested without spawning the process.

pub mod cli;

pub use cli::Cli;

use mongoschema_core::{
    MongoSchemaError, RenderOutcome, Result, SchemaExtractor, TEMPLATE_FILE_NAME, pipeline,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Locates the HTML diagram template.
///
/// An explicit path wins. Otherwise the template next to the running
/// executable is used, falling back to the copy in this crate's `assets/`.
pub fn template_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATE_FILE_NAME)))
        .filter(|path| path.is_file());

    beside_exe.unwrap_or_else(bundled_template_path)
}

/// Path of the template shipped in this crate's `assets/` directory.
pub fn bundled_template_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(TEMPLATE_FILE_NAME)
}

/// Returns the extractor compiled into this binary.
pub fn default_extractor() -> Box<dyn SchemaExtractor> {
    #[cfg(feature = "mongodb")]
    {
        Box::new(mongoschema_core::mongo::MongoExtractor)
    }
    #[cfg(not(feature = "mongodb"))]
    {
        Box::new(UnavailableExtractor)
    }
}

/// Stand-in used when the binary is built without a database driver.
#[cfg(not(feature = "mongodb"))]
struct UnavailableExtractor;

#[cfg(not(feature = "mongodb"))]
#[async_trait::async_trait]
impl SchemaExtractor for UnavailableExtractor {
    async fn extract(
        &self,
        _connection: &str,
        _config: &mongoschema_core::ExtractionConfig,
    ) -> Result<mongoschema_core::ExtractionResult> {
        Err(MongoSchemaError::configuration(
            "MongoDB support not available. Compile with --features mongodb",
        ))
    }
}

/// Runs the pipeline for parsed arguments.
///
/// # Errors
/// Propagates any resolution, extraction, or rendering failure.
pub async fn execute<E>(cli: &Cli, extractor: &E) -> Result<RenderOutcome>
where
    E: SchemaExtractor + ?Sized,
{
    let template = template_path(cli.template.as_deref());
    pipeline::run(cli.raw_options(), extractor, &template).await
}

/// Exit status for a finished run: 0 on success, 1 for every failure class.
pub const fn exit_status(outcome: &Result<RenderOutcome>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Prints the outcome for the user and maps it to the process exit code.
pub fn report(outcome: Result<RenderOutcome>) -> ExitCode {
    let status = exit_status(&outcome);
    match outcome {
        Ok(_) => {
            println!("Success.");
            println!();
        }
        Err(e) => report_failure(e),
    }
    ExitCode::from(status)
}

fn report_failure(error: MongoSchemaError) {
    use clap::CommandFactory;

    if error.wants_usage() {
        println!();
        println!("{}", error);
        println!();
        let _ = Cli::command().print_help();
        println!();
    } else if matches!(error, MongoSchemaError::Extraction { .. }) {
        // Collaborator failures are opaque; print the whole source chain.
        eprintln!("Error: {:#}", anyhow::Error::from(error));
    } else {
        eprintln!("Error: {}", error);
    }
}
