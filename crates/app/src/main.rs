use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use settings::Database;
use tokio::sync::watch;

mod scheduler;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "ledger", about = "Personal ledger service")]
struct Cli {
    /// Settings file, without extension.
    #[arg(long, env = "LEDGER_CONFIG", default_value = "settings")]
    config: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server and the daily recurring scheduler (default).
    Serve,
    /// Run one recurring tick and exit.
    Tick {
        /// Instant to run at, RFC 3339. Defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database).await?;
    let engine = Arc::new(engine::Engine::builder().database(db).build().await?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Tick { at } => {
            let processed = engine.run_recurring_tick(at.unwrap_or_else(Utc::now)).await?;
            tracing::info!(processed, "recurring tick done");
            Ok(())
        }
        Command::Serve => serve(engine, settings).await,
    }
}

async fn serve(
    engine: Arc<engine::Engine>,
    settings: settings::Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut tasks = tokio::task::JoinSet::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if let Some(server) = settings.server {
        let engine = engine.clone();
        tasks.spawn(async move {
            tracing::info!("Found server settings...");
            let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, server.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind server listener: {err}");
                    return;
                }
            };
            if let Err(err) = server::run_with_listener(engine, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    }

    if let Some(config) = settings.scheduler {
        tasks.spawn(scheduler::run(engine.clone(), config, shutdown_rx));
    }

    if tasks.is_empty() {
        tracing::warn!("nothing to run: no server or scheduler settings");
        return Ok(());
    }

    tasks.spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for shutdown signal: {err}");
            return;
        }
        tracing::info!("shutting down");
        let _ = shutdown_tx.send(true);
    });

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
