//! MongoDB schema extraction tool.
//!
//! Samples a MongoDB database, infers collection schemas including foreign
//! keys, and writes them as JSON or as an HTML diagram.
//!
//! # Exit codes
//! - 0: success (also when the format is not recognized and nothing is written)
//! - 1: missing input, invalid output target, extraction, template, or write failure

use clap::Parser;
use mongoschema::{Cli, default_extractor, execute, report};
use mongoschema_core::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    println!();
    println!("Extract schema from Mongo database (including foreign keys)");

    let extractor = default_extractor();
    report(execute(&cli, extractor.as_ref()).await)
}
