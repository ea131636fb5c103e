//! Converts legacy flow run notification policies into automations.
//!
//! The conversion is a pure function of the policy's fields: same policy in,
//! structurally equal automation out. Nothing here touches the network.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::api::models::{
    Action, AutomationCore, EventTrigger, FlowRunNotificationPolicy, Posture,
    ResourceSpecification, ResourceValue, TriggerType,
};

/// Name given to every migrated automation
pub const AUTOMATION_NAME: &str = "Flow Run State Change Notification";

/// Notification body used when the policy has no custom message template
pub const DEFAULT_BODY: &str = "
Flow run {{ flow.name }}/{{ flow_run.name }} observed in state `{{ flow_run.state.name }}` at {{ flow_run.state.timestamp }}.
Flow ID: {{ flow_run.flow_id }}
Flow run ID: {{ flow_run.id }}
Flow run URL: {{ flow_run|ui_url }}
State message: {{ flow_run.state.message }}
";

const RESOURCE_ID_LABEL: &str = "prefect.resource.id";
const RESOURCE_ROLE_LABEL: &str = "prefect.resource.role";
const FLOW_RUN_RESOURCE_PREFIX: &str = "prefect.flow-run.";
const TAG_RESOURCE_PREFIX: &str = "prefect.tag.";

/// Legacy `{token}` placeholders mapped to their automation template syntax.
/// Tokens not in this table are left in the message verbatim.
static PLACEHOLDER_MAP: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("flow_run_notification_policy_id", "Event ID {{ event.id }}"),
        ("flow_id", "{{ flow.id }}"),
        ("flow_name", "{{ flow.name }}"),
        ("flow_run_url", "{{ flow_run|ui_url }}"),
        ("flow_run_id", "{{ flow_run.id }}"),
        ("flow_run_name", "{{ flow_run.name }}"),
        ("flow_run_parameters", "{{ flow_run.parameters }}"),
        ("flow_run_state_type", "{{ flow_run.state.type }}"),
        ("flow_run_state_name", "{{ flow_run.state.name }}"),
        ("flow_run_state_timestamp", "{{ flow_run.state.timestamp }}"),
        ("flow_run_state_message", "{{ flow_run.state.message }}"),
    ])
});

/// Rewrite legacy placeholder tokens into the automation template syntax
fn rewrite_template(template: &str) -> String {
    let mut body = template.to_string();
    for (token, replacement) in PLACEHOLDER_MAP.iter() {
        body = body.replace(&format!("{{{token}}}"), replacement);
    }
    body
}

/// Build the automation equivalent to a legacy notification policy
pub fn convert_policy_to_automation(policy: &FlowRunNotificationPolicy) -> AutomationCore {
    let expect: BTreeSet<String> = if policy.state_names.is_empty() {
        BTreeSet::from([format!("{FLOW_RUN_RESOURCE_PREFIX}*")])
    } else {
        policy
            .state_names
            .iter()
            .map(|state| format!("{FLOW_RUN_RESOURCE_PREFIX}{state}"))
            .collect()
    };

    let match_related = if policy.tags.is_empty() {
        ResourceSpecification::empty()
    } else {
        ResourceSpecification::from([
            (
                RESOURCE_ID_LABEL,
                ResourceValue::Many(
                    policy
                        .tags
                        .iter()
                        .map(|tag| format!("{TAG_RESOURCE_PREFIX}{tag}"))
                        .collect(),
                ),
            ),
            (RESOURCE_ROLE_LABEL, ResourceValue::Single("tag".to_string())),
        ])
    };

    let body = match policy.message_template {
        Some(ref template) => rewrite_template(template),
        None => DEFAULT_BODY.to_string(),
    };

    AutomationCore {
        name: AUTOMATION_NAME.to_string(),
        description: "Migrated from a flow run notification policy using prefect-migrate"
            .to_string(),
        enabled: policy.is_active,
        trigger: EventTrigger {
            trigger_type: TriggerType::Event,
            match_resources: ResourceSpecification::from([(
                RESOURCE_ID_LABEL,
                ResourceValue::Single(format!("{FLOW_RUN_RESOURCE_PREFIX}*")),
            )]),
            match_related,
            expect,
            for_each: BTreeSet::from([RESOURCE_ID_LABEL.to_string()]),
            posture: Posture::Reactive,
            threshold: 1,
            within: 0.0,
        },
        actions: vec![Action::SendNotification {
            block_document_id: policy.block_document_id,
            subject: "Prefect flow run notification".to_string(),
            body,
        }],
    }
}
