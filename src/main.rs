//! spanner-cli - A Google Cloud Spanner terminal client.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use spanner_cli::app::Orchestrator;
use spanner_cli::cli::Cli;
use spanner_cli::config::{Config, Settings};
use spanner_cli::db::{DatabaseClient, MockDatabaseClient, SpannerClient, SpannerClientConfig};
use spanner_cli::error::{Result, SpannerCliError};
use spanner_cli::logging;
use spanner_cli::output::{Pager, Printer};
use spanner_cli::repl::{history_path, Repl};
use spanner_cli::session::{Session, Target};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Precedence: flags and environment, then the config file.
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.merge(&cli.to_config());
    let settings = Settings::from_config(config)?;

    let client = build_client(&cli, &settings)?;
    let session = Session::new(
        client,
        Target {
            project: settings.project.clone(),
            instance: settings.instance.clone(),
            database: settings.database.clone(),
        },
    )
    .with_max_rows(settings.max_rows);
    let app = Orchestrator::new(session);

    if cli.execute.is_some() || !io::stdin().is_terminal() {
        let sql = match cli.execute {
            Some(sql) => sql,
            None => read_stdin()?,
        };
        return Ok(run_batch(&app, &sql).await);
    }

    let pager = settings.pager.then(Pager::from_env);
    let history = history_path(settings.history_file.as_deref());
    let mut repl = Repl::new(app, Printer::new(pager), history)?;
    repl.run().await?;

    Ok(ExitCode::SUCCESS)
}

fn build_client(cli: &Cli, settings: &Settings) -> Result<Box<dyn DatabaseClient>> {
    if cli.mock_db {
        info!("Using mock database");
        return Ok(Box::new(
            MockDatabaseClient::new().with_database(settings.database.clone()),
        ));
    }

    let mut config = SpannerClientConfig::new(&settings.project, &settings.instance)?
        .with_access_token(cli.token.clone())
        .with_timeout(settings.timeout_secs);
    if let Some(endpoint) = &settings.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }

    Ok(Box::new(SpannerClient::new(config)?))
}

fn read_stdin() -> Result<String> {
    let mut sql = String::new();
    io::stdin()
        .read_to_string(&mut sql)
        .map_err(|e| SpannerCliError::io(format!("Failed to read stdin: {e}")))?;
    Ok(sql)
}

/// Runs one statement, printing TSV. Any failure is reported on stderr and
/// turns into a failing exit status.
async fn run_batch(app: &Orchestrator, sql: &str) -> ExitCode {
    let printer = Printer::default();

    match app.execute_batch(sql).await.and_then(|r| printer.print(&r)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            printer.print_error(&e);
            ExitCode::FAILURE
        }
    }
}
