pub mod handler;

use anyhow::Result;
use clap::{Args, Subcommand};

pub use handler::{clear_command, migrate_command};

#[derive(Args)]
pub struct FlowRunNotificationCommands {
    #[command(subcommand)]
    pub command: FlowRunNotificationSubcommands,
}

#[derive(Subcommand)]
pub enum FlowRunNotificationSubcommands {
    /// Migrate all flow run notification policies to automations
    Migrate,
    /// Delete all flow run notification policies. Make sure you have migrated
    /// them to automations first
    Clear,
}

/// Handle the flow-run-notifications command
pub async fn handle_flow_run_notifications_command(
    args: FlowRunNotificationCommands,
) -> Result<()> {
    match args.command {
        FlowRunNotificationSubcommands::Migrate => migrate_command().await,
        FlowRunNotificationSubcommands::Clear => clear_command().await,
    }
}
