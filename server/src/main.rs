mod config;
mod graphql;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeDirectory, EmployeeId, InMemoryDirectory, ReportingStructureService};
use tracing::info;

use crate::{
    config::AppConfig,
    graphql::{GraphqlData, ReportingService},
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "hr-directory", version, about = "Employee directory and reporting structures")]
struct Cli {
    /// Employee seed file; overrides HR_SEED_PATH.
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the reporting structure of one employee as JSON.
    Report {
        employee_id: String,
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::from_env()?)?;
    let cli = Cli::parse();
    let mut app_config = AppConfig::load()?;
    if let Some(seed) = cli.seed {
        app_config.seed_path = seed;
    }
    let app_config = Arc::new(app_config);
    let directory = InMemoryDirectory::load(&app_config.seed_path)
        .with_context(|| format!("loading {}", app_config.seed_path.display()))?;

    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config, directory).await,
        Command::Report {
            employee_id,
            pretty,
        } => print_report(directory, &employee_id, pretty),
    }
}

fn reporting_service(directory: InMemoryDirectory) -> ReportingService {
    let directory: Arc<dyn EmployeeDirectory> = Arc::new(directory);
    ReportingStructureService::new(directory)
}

async fn run_server(
    cmd: ServeCommand,
    config: Arc<AppConfig>,
    directory: InMemoryDirectory,
) -> Result<()> {
    let employee_count = directory.len();
    let reporting = Arc::new(reporting_service(directory));
    let schema = graphql::build_schema(GraphqlData {
        reporting: reporting.clone(),
    });
    let state = AppState {
        reporting,
        schema,
        config,
        employee_count,
    };
    http::serve(cmd.into(), state).await
}

fn print_report(directory: InMemoryDirectory, raw_id: &str, pretty: bool) -> Result<()> {
    let employee_id = EmployeeId::parse(raw_id)?;
    let structure = reporting_service(directory)
        .generate_for_id(&employee_id)
        .with_context(|| format!("reporting structure for {employee_id}"))?;
    info!(
        %employee_id,
        number_of_reports = structure.number_of_reports,
        "reporting structure computed"
    );
    let rendered = if pretty {
        serde_json::to_string_pretty(&structure)?
    } else {
        serde_json::to_string(&structure)?
    };
    println!("{rendered}");
    Ok(())
}
