//! Command-line surface of `extract-mongo-schema`.
//!
//! `--database` and `--output` are declared optional so that their absence
//! is reported by the resolver (with usage guidance and exit code 1) rather
//! than by clap.

use clap::{ArgAction, Args, Parser};
use mongoschema_core::RawOptions;
use std::path::PathBuf;

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "extract-mongo-schema")]
#[command(about = "Extract schema from Mongo database (including foreign keys)")]
#[command(version)]
#[command(long_about = "
Extract schema from Mongo database (including foreign keys)

Samples documents from each collection, infers field types, detects fields
that reference documents in other collections, and writes the result as JSON
or as a self-contained HTML diagram.

EXAMPLES:
  extract-mongo-schema -d mongodb://localhost:3001/meteor -o schema.json
  extract-mongo-schema -d mongodb://localhost:3001/meteor -o schema.html -f html-diagram
  extract-mongo-schema -d mongodb://localhost/app -o schema.json -c users,posts -n posts:authorId
")]
pub struct Cli {
    /// Database connection string
    #[arg(
        short = 'd',
        long,
        value_name = "STRING",
        help = "Database connection string. Example: \"mongodb://localhost:3001/meteor\""
    )]
    pub database: Option<String>,

    /// Output file
    #[arg(short = 'o', long, value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(
        short = 'f',
        long,
        value_name = "FORMAT",
        help = "Output file format. Can be \"json\" or \"html-diagram\" [default: json]"
    )]
    pub format: Option<String>,

    /// Collections to analyze
    #[arg(
        short = 'c',
        long,
        value_name = "LIST",
        help = "Comma separated list of collections to analyze. Example: \"collection1,collection2\""
    )]
    pub collection: Option<String>,

    /// Array types to analyze
    #[arg(
        short = 'a',
        long,
        value_name = "LIST",
        help = "Comma separated list of types of arrays to analyze. Example: \"Uint8Array,ArrayBuffer,Array\""
    )]
    pub array: Option<String>,

    /// Report type frequencies
    #[arg(
        short = 'r',
        long,
        help = "Shows the exact list of types with frequency instead of the most frequent type only"
    )]
    pub raw: bool,

    /// Documents sampled per collection
    #[arg(
        short = 'l',
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Changes the amount of items to parse from the collections [default: 100]"
    )]
    pub limit: Option<u32>,

    /// Foreign keys not to follow
    #[arg(
        short = 'n',
        long = "dont-follow-fk",
        value_name = "FIELD",
        num_args = 1..,
        action = ArgAction::Append,
        help = "Don't follow specified foreign key. Can be simply \"fieldName\" (all collections) or \"collectionName:fieldName\" (only for given collection)"
    )]
    pub dont_follow_fk: Vec<String>,

    /// HTML template override
    #[arg(long, hide = true, value_name = "FILE", env = "EXTRACT_MONGO_SCHEMA_TEMPLATE")]
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Logging verbosity flags
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Copies the option values into the resolver's input.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            database: self.database.clone(),
            output: self.output.clone(),
            format: self.format.clone(),
            collection: self.collection.clone(),
            array: self.array.clone(),
            raw: self.raw,
            limit: self.limit,
            dont_follow_fk: self.dont_follow_fk.clone(),
        }
    }
}
