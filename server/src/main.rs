mod config;
mod http;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeService, seed::seed_demo};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee directory service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees.
    Seed {
        #[arg(long, help = "Delete every employee before seeding")]
        reset: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
    /// List pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env("employee-server"))?;
    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Migrate(action) => {
            let pool = setup_pool(&config).await?;
            match action {
                MigrateCommand::Up => migrate_up(&pool).await,
                MigrateCommand::Down => migrate_down(&pool).await,
                MigrateCommand::Status => migrate_status(&pool).await,
            }
        }
        Command::Seed { reset } => run_seed(&config, reset).await,
    }
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    connect(&config.database)
        .await
        .context("failed to open database pool")
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool(&config).await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let state = AppState::new(pool, config);
    http::serve(ServeConfig::from(&cmd), state).await
}

async fn run_seed(config: &AppConfig, reset: bool) -> Result<()> {
    let pool = setup_pool(config).await?;
    ensure_migrations(&pool, false).await?;
    let service = EmployeeService::from_pool(pool);
    let report = seed_demo(&service, reset)
        .await
        .context("seeding demo employees failed")?;
    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        removed = report.removed,
        "seed complete"
    );
    Ok(())
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "{} pending migration(s); run `employee-server migrate up` or pass --allow-dirty",
            pending.len()
        );
    }
    Ok(())
}

async fn migrate_up(pool: &DbPool) -> Result<()> {
    Migrator::up(pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(pool: &DbPool) -> Result<()> {
    Migrator::down(pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn migrate_status(pool: &DbPool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if pending.is_empty() {
        info!("database schema is up to date");
    }
    for migration in pending {
        info!(name = migration.name(), "pending migration");
    }
    Ok(())
}
