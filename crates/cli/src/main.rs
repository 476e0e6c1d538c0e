use clap::Parser;
use commands::Command;
use route_sync_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "route-sync")]
#[command(version)]
#[command(about = "Keeps Keenetic static routes in line with domain groups")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Database path
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Router address, overrides [router] host
    #[arg(long, global = true)]
    router_host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        router_host: cli.router_host.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging, cli.log_level.as_deref());

    info!("Starting route-sync v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    let router = di::RouterServices::new(&config.router)?;
    let use_cases = di::UseCases::new(&config, &repos, &router)?;

    match cli.command {
        Command::Sync => commands::sync(&use_cases).await,
        Command::Generate { group } => {
            commands::generate(&use_cases, &repos, group.as_deref()).await
        }
        Command::Push { group } => commands::push(&use_cases, &repos, group.as_deref()).await,
        Command::Cleanup => commands::cleanup(&use_cases).await,
        Command::Reconcile => commands::reconcile(&use_cases).await,
        Command::Routes => commands::list_routes(&use_cases).await,
        Command::Journal { limit } => commands::journal(&use_cases, limit).await,
        Command::Watch => commands::watch(&config, &use_cases).await,
        Command::Daemon => commands::daemon(&config, &use_cases).await,
    }
}
