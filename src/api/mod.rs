pub mod client;
pub mod constants;
pub mod models;

pub use client::{PrefectApi, PrefectClient, ServerType};
pub use models::{
    Action, AutomationCore, EventTrigger, FlowRunNotificationPolicy,
    FlowRunNotificationPolicyFilter, Posture, ResourceSpecification, ResourceValue, TriggerType,
};
