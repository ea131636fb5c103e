use anyhow::Result;
use clap::Parser;
use log::info;

use prefect_migrate::cli::commands;
use prefect_migrate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    info!("Starting prefect-migrate");

    match cli.command {
        Commands::FlowRunNotifications(args) => {
            commands::handle_flow_run_notifications_command(args).await?;
        }
    }

    Ok(())
}
