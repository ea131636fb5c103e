pub mod flow_run_notifications;

// Re-export flow run notification commands
pub use flow_run_notifications::{
    FlowRunNotificationCommands, handle_flow_run_notifications_command,
};
