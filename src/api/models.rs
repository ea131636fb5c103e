//! Wire types for the Prefect objects this tool reads and writes

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Legacy flow run notification policy as returned by the server.
///
/// Owned by the server; this tool only reads and deletes these records.
/// Everything except the id and the block document reference is optional
/// server-side, so missing fields fall back to safe defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowRunNotificationPolicy {
    pub id: Uuid,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub state_names: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub block_document_id: Uuid,
    #[serde(default)]
    pub message_template: Option<String>,
}

fn default_is_active() -> bool {
    true
}

/// Filter body accepted by the policy filter endpoint
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowRunNotificationPolicyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<IsActiveFilter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IsActiveFilter {
    #[serde(rename = "eq_", skip_serializing_if = "Option::is_none")]
    pub eq: Option<bool>,
}

/// Automation record submitted to the server on creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationCore {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub trigger: EventTrigger,
    pub actions: Vec<Action>,
}

/// Action performed when an automation fires
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "send-notification")]
    SendNotification {
        block_document_id: Uuid,
        subject: String,
        body: String,
    },
}

/// Reactive event trigger specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTrigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    #[serde(rename = "match")]
    pub match_resources: ResourceSpecification,
    pub match_related: ResourceSpecification,
    pub expect: BTreeSet<String>,
    pub for_each: BTreeSet<String>,
    pub posture: Posture,
    pub threshold: u32,
    /// Observation window in seconds
    pub within: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerType {
    #[serde(rename = "event")]
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Posture {
    Reactive,
    Proactive,
}

/// A resource filter: labels mapped to one or many accepted values.
/// An empty specification matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSpecification(pub BTreeMap<String, ResourceValue>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Single(String),
    Many(Vec<String>),
}

impl ResourceSpecification {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, ResourceValue); N]> for ResourceSpecification {
    fn from(entries: [(&str, ResourceValue); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect(),
        )
    }
}
