//! Flow run notification policy migration handlers

use anyhow::Result;
use colored::*;
use dialoguer::Confirm;

use crate::api::{
    FlowRunNotificationPolicyFilter, PrefectApi, PrefectClient, ServerType,
};
use crate::config::Settings;
use crate::conversion::convert_policy_to_automation;

/// Handle the migrate subcommand
pub async fn migrate_command() -> Result<()> {
    let client = connect()?;
    run_migrate(&client, || {
        Ok(Confirm::new()
            .with_prompt("Do you want to migrate these policies to automations?")
            .default(false)
            .interact()?)
    })
    .await
}

/// Handle the clear subcommand
pub async fn clear_command() -> Result<()> {
    let client = connect()?;
    run_clear(&client, || {
        Ok(Confirm::new()
            .with_prompt("Are you sure you want to delete all flow run notification policies?")
            .default(false)
            .interact()?)
    })
    .await
}

fn connect() -> Result<PrefectClient> {
    let settings = Settings::load()?;
    PrefectClient::new(settings.api_url, settings.api_key)
}

async fn run_migrate<C, F>(client: &C, confirm: F) -> Result<()>
where
    C: PrefectApi + ?Sized,
    F: FnOnce() -> Result<bool>,
{
    if client.server_type() == ServerType::Cloud {
        println!("Currently connected to Prefect Cloud. No migration needed.");
        return Ok(());
    }

    println!(
        "Connecting to Prefect server at {}",
        client.api_url().bold()
    );

    let policies = client
        .read_flow_run_notification_policies(Some(FlowRunNotificationPolicyFilter::default()))
        .await?;

    if policies.is_empty() {
        println!("No flow run notification policies found. No migration needed.");
        return Ok(());
    }

    println!(
        "Found {} flow run notification policies.",
        policies.len().to_string().bold()
    );

    if !confirm()? {
        println!("{}", "Migration cancelled.".yellow());
        return Ok(());
    }

    for policy in &policies {
        println!("Migrating policy {}...", policy.id.to_string().bold());
        let automation = convert_policy_to_automation(policy);
        client.create_automation(&automation).await?;
    }

    println!(
        "{}",
        "Migration complete. Once you've verified the created automations, you can delete \
         the old policies with `prefect-migrate flow-run-notifications clear`"
            .green()
    );

    Ok(())
}

async fn run_clear<C, F>(client: &C, confirm: F) -> Result<()>
where
    C: PrefectApi + ?Sized,
    F: FnOnce() -> Result<bool>,
{
    let policies = client
        .read_flow_run_notification_policies(Some(FlowRunNotificationPolicyFilter::default()))
        .await?;

    if policies.is_empty() {
        println!("No flow run notification policies found. No deletion needed.");
        return Ok(());
    }

    if !confirm()? {
        println!("{}", "Deletion cancelled.".yellow());
        return Ok(());
    }

    for policy in &policies {
        client.delete_flow_run_notification_policy(policy.id).await?;
    }

    println!("{}", "Deletion complete.".green());

    Ok(())
}
