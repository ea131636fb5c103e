use std::collections::BTreeSet;

use serde_json::json;
use uuid::Uuid;

use prefect_migrate::api::models::{
    Action, FlowRunNotificationPolicy, Posture, ResourceSpecification, ResourceValue,
};
use prefect_migrate::conversion::{AUTOMATION_NAME, DEFAULT_BODY, convert_policy_to_automation};

/// Test helper to build a policy with the given optional fields
fn policy(
    state_names: &[&str],
    tags: &[&str],
    message_template: Option<&str>,
) -> FlowRunNotificationPolicy {
    FlowRunNotificationPolicy {
        id: Uuid::new_v4(),
        is_active: true,
        state_names: state_names.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        block_document_id: Uuid::new_v4(),
        message_template: message_template.map(|s| s.to_string()),
    }
}

fn expect_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn basic_conversion() {
    let policy = policy(&["Completed", "Failed"], &[], None);

    let automation = convert_policy_to_automation(&policy);

    assert_eq!(automation.name, AUTOMATION_NAME);
    assert!(automation.enabled);
    assert_eq!(automation.actions.len(), 1);
    let Action::SendNotification {
        block_document_id,
        subject,
        body,
    } = &automation.actions[0];
    assert_eq!(*block_document_id, policy.block_document_id);
    assert_eq!(subject, "Prefect flow run notification");
    assert_eq!(body, DEFAULT_BODY);
    assert_eq!(
        automation.trigger.expect,
        expect_set(&["prefect.flow-run.Completed", "prefect.flow-run.Failed"])
    );
}

#[test]
fn conversion_rewrites_the_legacy_default_message() {
    let legacy_template = "
Flow run {flow_name}/{flow_run_name} entered state `{flow_run_state_name}` at {flow_run_state_timestamp}.

Flow ID: {flow_id}
Flow run ID: {flow_run_id}
Flow run URL: {flow_run_url}
State message: {flow_run_state_message}
";
    let expected = "
Flow run {{ flow.name }}/{{ flow_run.name }} entered state `{{ flow_run.state.name }}` at {{ flow_run.state.timestamp }}.

Flow ID: {{ flow.id }}
Flow run ID: {{ flow_run.id }}
Flow run URL: {{ flow_run|ui_url }}
State message: {{ flow_run.state.message }}
";

    let policy = policy(&["Completed"], &[], Some(legacy_template));

    let automation = convert_policy_to_automation(&policy);

    let Action::SendNotification { body, .. } = &automation.actions[0];
    assert_eq!(body, expected);
}

#[test]
fn conversion_rewrites_a_custom_message() {
    let policy = policy(
        &["Running"],
        &[],
        Some("Flow {flow_name} is in state {flow_run_state_name}"),
    );
    let policy = FlowRunNotificationPolicy {
        is_active: false,
        ..policy
    };

    let automation = convert_policy_to_automation(&policy);

    let Action::SendNotification { body, .. } = &automation.actions[0];
    assert_eq!(body, "Flow {{ flow.name }} is in state {{ flow_run.state.name }}");
    assert!(!automation.enabled);
}

#[test]
fn conversion_with_tags() {
    let policy = policy(&["Completed"], &["production", "critical"], None);

    let automation = convert_policy_to_automation(&policy);

    assert_eq!(
        automation.trigger.match_related,
        ResourceSpecification::from([
            (
                "prefect.resource.id",
                ResourceValue::Many(vec![
                    "prefect.tag.production".to_string(),
                    "prefect.tag.critical".to_string(),
                ]),
            ),
            (
                "prefect.resource.role",
                ResourceValue::Single("tag".to_string()),
            ),
        ])
    );
}

#[test]
fn conversion_without_tags_matches_no_related_resources() {
    let policy = policy(&["Completed"], &[], None);

    let automation = convert_policy_to_automation(&policy);

    assert!(automation.trigger.match_related.is_empty());
}

#[test]
fn conversion_without_state_names_expects_any_state() {
    let policy = policy(&[], &[], None);

    let automation = convert_policy_to_automation(&policy);

    assert_eq!(automation.trigger.expect, expect_set(&["prefect.flow-run.*"]));
}

#[test]
fn trigger_configuration() {
    let policy = policy(&["Completed"], &[], None);

    let automation = convert_policy_to_automation(&policy);

    assert_eq!(
        automation.trigger.match_resources,
        ResourceSpecification::from([(
            "prefect.resource.id",
            ResourceValue::Single("prefect.flow-run.*".to_string()),
        )])
    );
    assert_eq!(automation.trigger.within, 0.0);
    assert_eq!(automation.trigger.posture, Posture::Reactive);
    assert_eq!(automation.trigger.for_each, expect_set(&["prefect.resource.id"]));
    assert_eq!(automation.trigger.threshold, 1);
}

#[test]
fn inactive_policy_produces_a_disabled_automation() {
    let policy = FlowRunNotificationPolicy {
        is_active: false,
        ..policy(&["Completed"], &[], None)
    };

    let automation = convert_policy_to_automation(&policy);

    assert!(!automation.enabled);
}

#[test]
fn conversion_is_deterministic() {
    let policy = policy(
        &["Failed", "Crashed"],
        &["etl"],
        Some("Run {flow_run_name}: {flow_run_state_name}"),
    );

    assert_eq!(
        convert_policy_to_automation(&policy),
        convert_policy_to_automation(&policy)
    );
}

#[test]
fn automation_serializes_to_the_expected_wire_shape() {
    let policy = policy(&["Failed"], &["etl"], None);

    let automation = convert_policy_to_automation(&policy);
    let value = serde_json::to_value(&automation).unwrap();

    assert_eq!(value["actions"][0]["type"], "send-notification");
    assert_eq!(
        value["actions"][0]["block_document_id"],
        json!(policy.block_document_id.to_string())
    );
    assert_eq!(value["trigger"]["type"], "event");
    assert_eq!(
        value["trigger"]["match"],
        json!({"prefect.resource.id": "prefect.flow-run.*"})
    );
    assert_eq!(value["trigger"]["expect"], json!(["prefect.flow-run.Failed"]));
    assert_eq!(
        value["trigger"]["match_related"],
        json!({
            "prefect.resource.id": ["prefect.tag.etl"],
            "prefect.resource.role": "tag",
        })
    );
    assert_eq!(value["trigger"]["posture"], "Reactive");
    assert_eq!(value["trigger"]["threshold"], 1);
    assert_eq!(value["trigger"]["within"], 0.0);
}
