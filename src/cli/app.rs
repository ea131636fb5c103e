use super::commands::flow_run_notifications::FlowRunNotificationCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prefect-migrate")]
#[command(about = "A CLI tool for migrating deprecated Prefect constructs to their replacements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flow run notification policy migration tools
    FlowRunNotifications(FlowRunNotificationCommands),
}
