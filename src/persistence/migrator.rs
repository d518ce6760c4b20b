//! Diesel-backed migration runner for the mirror database.

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::pg::PgConnection;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::StorageError;

/// Embedded Diesel migrations shipped with the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Schema version recorded by the first migration in this repository.
pub const INITIAL_SCHEMA_VERSION: &str = "20260829000000";

/// A Diesel migration version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Returns the inner version string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Runs pending database migrations and records the resulting schema version
/// in telemetry.
///
/// Existing deployments are never altered: the initial migration creates the
/// mirror tables only when absent.
///
/// # Errors
///
/// Returns [`StorageError`] when the database cannot be opened, migrations
/// fail, or the resulting schema version cannot be read.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<SchemaVersion, StorageError> {
    let database_url_trimmed = database_url.trim();
    if database_url_trimmed.is_empty() {
        return Err(StorageError::BlankDatabaseUrl);
    }

    let mut connection = PgConnection::establish(database_url_trimmed).map_err(|error| {
        StorageError::ConnectionFailed {
            message: error.to_string(),
        }
    })?;

    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| StorageError::MigrationFailed {
            message: error.to_string(),
        })?;

    let schema_version = read_schema_version(&mut connection)?;
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: schema_version.as_str().to_owned(),
    });

    Ok(schema_version)
}

fn read_schema_version(connection: &mut PgConnection) -> Result<SchemaVersion, StorageError> {
    #[derive(Debug, QueryableByName)]
    struct Row {
        #[diesel(sql_type = Text)]
        version: String,
    }

    let result: Option<Row> =
        sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version DESC LIMIT 1;")
            .get_result(connection)
            .optional()
            .map_err(|error| StorageError::SchemaVersionQueryFailed {
                message: error.to_string(),
            })?;

    let Some(row) = result else {
        return Err(StorageError::MissingSchemaVersion);
    };

    Ok(SchemaVersion(row.version))
}

#[cfg(test)]
mod tests {
    use super::migrate_database;
    use crate::persistence::StorageError;
    use crate::telemetry::test_support::RecordingSink;

    #[test]
    fn migrate_database_rejects_blank_urls() {
        let telemetry = RecordingSink::default();
        assert_eq!(
            migrate_database("   ", &telemetry),
            Err(StorageError::BlankDatabaseUrl)
        );
        assert!(telemetry.take().is_empty());
    }
}
