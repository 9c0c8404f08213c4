use crate::{
    commands::{Commands, ReportArgs, SelectionArgs},
    conn::{ConnectionPinger, MySqlConnectionPinger},
    env::EnvManager,
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use connectors::sql::{base::adapter::SqlAdapter, mysql::adapter::MySqlAdapter};
use engine_runtime::{
    execution::executor::{self, ApplyOptions},
    report::ApplyReport,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "colshift",
    version = "0.1.0",
    about = "Bulk column and table alterations for MySQL"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "KEY=VALUE file used to expand `${VAR}` in connection URLs"
    )]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let code = match run(cli, shutdown.cancel_token()).await {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            ExitCode::GeneralError
        }
    };

    let code = if shutdown.is_shutdown_requested() {
        ExitCode::ShutdownRequested
    } else {
        code
    };

    std::process::exit(code.as_i32());
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<ExitCode, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    match cli.command {
        Commands::Alter {
            selection,
            report,
            connections,
            write,
        } => {
            if !write {
                warn!("Running without --write, no table will be altered");
            }
            let options = ApplyOptions {
                max_workers: connections,
                dry_run: !write,
            };
            let applied = alter(&env, &selection, options, cancel).await?;
            emit(&applied, &report).await?;

            if applied.has_failures() {
                return Ok(ExitCode::StatementsFailed);
            }
        }
        Commands::Plan { selection, report } => {
            let options = ApplyOptions {
                max_workers: 0,
                dry_run: true,
            };
            let planned = alter(&env, &selection, options, cancel).await?;
            emit(&planned, &report).await?;
        }
        Commands::TestConn { conn_str } => {
            let conn_str = env.interpolate(&conn_str)?;
            MySqlConnectionPinger { conn_str }.ping().await?;
            println!("Connection OK");
        }
    }

    Ok(ExitCode::Success)
}

async fn alter(
    env: &EnvManager,
    selection: &SelectionArgs,
    options: ApplyOptions,
    cancel: CancellationToken,
) -> Result<ApplyReport, CliError> {
    // fail on bad flags before opening any connection
    let criteria = selection.criteria()?;
    let url = env.interpolate(&selection.conn_str)?;

    let adapter = MySqlAdapter::connect(&url).await?;
    let results = executor::run(&criteria, adapter, options, cancel).await?;

    let report = ApplyReport::from_results(&results);
    info!(
        "{} tables: {} applied, {} failed, {} cancelled, {} not executed",
        report.total, report.applied, report.failed, report.cancelled, report.dry_run
    );
    Ok(report)
}

async fn emit(report: &ApplyReport, args: &ReportArgs) -> Result<(), CliError> {
    match &args.output {
        Some(path) => output::write_report(report, args.json, path).await,
        None => output::print_report(report, args.json),
    }
}
