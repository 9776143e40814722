use anyhow::Result;
use clap::{Parser, Subcommand};
use meatsafe_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "meatsafe-core", version, about = "MeatSafe seizure ledger service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations, seed the bootstrap admin and serve HTTP (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let prometheus = telemetry::init(&config.telemetry);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            migration::run_migrations(&config).await?;
            info!("Migrations applied, exiting");
            Ok(())
        }
        Command::Serve => {
            info!("Starting MeatSafe Core Service");
            server::run(config, prometheus).await
        }
    }
}
