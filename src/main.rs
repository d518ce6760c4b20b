//! Prism CLI entrypoint: mirror merged pull requests into Postgres.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use prism::telemetry::StderrJsonlTelemetrySink;
use prism::{
    ConfigError, FetchError, MirrorConfig, OctocrabSourceGateway, PersonalAccessToken, PgStore,
    RepositoryId, StorageError, SyncError, migrate_database, mirror_repositories,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Mirror merged pull requests and their review comments into a database.
#[derive(Debug, Parser)]
#[command(name = "prism", version)]
struct Cli {
    /// Repository identifiers to mirror, in `owner/name` form.
    #[arg(required = true, value_name = "OWNER/NAME")]
    repositories: Vec<String>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RunError> {
    let cli = Cli::parse();

    // A .env file in the working directory supplements the environment;
    // already-set variables win.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = MirrorConfig::from_env()?;
    let identifiers = cli
        .repositories
        .iter()
        .map(|identifier| RepositoryId::parse(identifier))
        .collect::<Result<Vec<_>, _>>()?;

    let telemetry = StderrJsonlTelemetrySink;
    let database_url = config.database_url();
    migrate_database(&database_url, &telemetry)?;
    let mut store = PgStore::connect(&database_url)?;

    let token = PersonalAccessToken::new(config.token())?;
    // Clap enforces at least one identifier; guard anyway so the gateway
    // always has an API base to build against.
    let Some(first_id) = identifiers.first() else {
        return Ok(());
    };
    let gateway = OctocrabSourceGateway::for_token(&token, first_id)?;

    mirror_repositories(&gateway, &mut store, &telemetry, &identifiers).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
