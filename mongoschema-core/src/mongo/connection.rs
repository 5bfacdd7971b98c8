//! MongoDB client creation.
//!
//! Connection strings are parsed by the driver, so multi-host and
//! `mongodb+srv://` URIs are accepted as written. They are only ever logged
//! or embedded in errors through [`redact_database_url`].

use crate::Result;
use crate::error::{MongoSchemaError, redact_database_url};
use mongodb::Client;
use mongodb::options::ClientOptions;
use std::time::Duration;

/// Default timeout for establishing connections and selecting a server.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a client for `connection_string` and returns it together with
/// the database named in the URI path.
///
/// # Errors
/// Returns error if the string is invalid, names no database, or the client
/// cannot be created. No network round-trip happens here.
pub async fn connect(connection_string: &str) -> Result<(Client, String)> {
    let mut options = ClientOptions::parse(connection_string)
        .await
        .map_err(|e| {
            MongoSchemaError::extraction_failed(
                format!(
                    "Failed to parse MongoDB connection options for {}",
                    redact_database_url(connection_string)
                ),
                e,
            )
        })?;

    let database = options.default_database.clone().ok_or_else(|| {
        MongoSchemaError::configuration(
            "No database specified in MongoDB connection string. \
             Use mongodb://host:port/database_name format.",
        )
    })?;

    options.connect_timeout.get_or_insert(DEFAULT_TIMEOUT);
    options.server_selection_timeout.get_or_insert(DEFAULT_TIMEOUT);
    options.app_name = Some(format!("extract-mongo-schema-{}", env!("CARGO_PKG_VERSION")));

    let client = Client::with_options(options).map_err(|e| {
        MongoSchemaError::extraction_failed(
            format!(
                "Failed to create MongoDB client for {}",
                redact_database_url(connection_string)
            ),
            e,
        )
    })?;

    tracing::debug!(
        "Created MongoDB client for {} (database '{}')",
        redact_database_url(connection_string),
        database
    );

    Ok((client, database))
}
