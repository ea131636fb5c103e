//! HTTP client for the Prefect REST API

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use serde_json::{Value, json};
use uuid::Uuid;

use super::constants::{self, headers};
use super::models::{AutomationCore, FlowRunNotificationPolicy, FlowRunNotificationPolicyFilter};

/// Kind of Prefect deployment the client is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerType {
    Cloud,
    Server,
}

/// The subset of the Prefect API this tool consumes.
///
/// Implemented by [`PrefectClient`] for real servers and by in-memory fakes
/// in the command tests.
#[async_trait]
pub trait PrefectApi: Send + Sync {
    fn server_type(&self) -> ServerType;

    fn api_url(&self) -> &str;

    async fn read_flow_run_notification_policies(
        &self,
        filter: Option<FlowRunNotificationPolicyFilter>,
    ) -> anyhow::Result<Vec<FlowRunNotificationPolicy>>;

    async fn create_automation(&self, automation: &AutomationCore) -> anyhow::Result<Uuid>;

    async fn delete_flow_run_notification_policy(&self, id: Uuid) -> anyhow::Result<()>;
}

/// Prefect REST API client with connection pooling
#[derive(Clone)]
pub struct PrefectClient {
    api_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl PrefectClient {
    pub fn new(api_url: String, api_key: Option<String>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("prefect-migrate/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, endpoint);
        let mut builder = self
            .http_client
            .request(method, url)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .header(headers::API_VERSION_HEADER, headers::API_VERSION);

        if let Some(ref api_key) = self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        builder
    }
}

#[async_trait]
impl PrefectApi for PrefectClient {
    fn server_type(&self) -> ServerType {
        if self.api_url.starts_with(constants::CLOUD_API_URL) {
            ServerType::Cloud
        } else {
            ServerType::Server
        }
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn read_flow_run_notification_policies(
        &self,
        filter: Option<FlowRunNotificationPolicyFilter>,
    ) -> anyhow::Result<Vec<FlowRunNotificationPolicy>> {
        let body = json!({
            "flow_run_notification_policy_filter": filter,
            "limit": Value::Null,
            "offset": 0,
        });

        debug!("Listing flow run notification policies");
        let response = self
            .request(reqwest::Method::POST, constants::POLICIES_FILTER_ENDPOINT)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(&body)
            .send()
            .await
            .context("Failed to list flow run notification policies")?;

        let status = response.status();
        if status.is_success() {
            let policies: Vec<FlowRunNotificationPolicy> = response
                .json()
                .await
                .context("Failed to parse flow run notification policies")?;
            debug!("Server returned {} policies", policies.len());
            Ok(policies)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Policy listing failed with status {}: {}", status, error_text)
        }
    }

    async fn create_automation(&self, automation: &AutomationCore) -> anyhow::Result<Uuid> {
        debug!("Creating automation '{}'", automation.name);
        let response = self
            .request(reqwest::Method::POST, constants::AUTOMATIONS_ENDPOINT)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(automation)
            .send()
            .await
            .context("Failed to create automation")?;

        let status = response.status();
        if status.is_success() {
            let created: Value = response
                .json()
                .await
                .context("Failed to parse created automation")?;
            let id = created["id"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("Expected 'id' in automation response"))?;
            Ok(Uuid::parse_str(id).context("Server returned a malformed automation id")?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!(
                "Automation creation failed with status {}: {}",
                status,
                error_text
            )
        }
    }

    async fn delete_flow_run_notification_policy(&self, id: Uuid) -> anyhow::Result<()> {
        debug!("Deleting flow run notification policy {}", id);
        let endpoint = format!("{}/{}", constants::POLICIES_ENDPOINT, id);
        let response = self
            .request(reqwest::Method::DELETE, &endpoint)
            .send()
            .await
            .with_context(|| format!("Failed to delete notification policy {}", id))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Policy deletion failed with status {}: {}", status, error_text)
        }
    }
}
