//! API constants for the Prefect REST API

/// API URL prefix used by Prefect Cloud workspaces
pub const CLOUD_API_URL: &str = "https://api.prefect.cloud/api";

/// Filter endpoint for flow run notification policies
pub const POLICIES_FILTER_ENDPOINT: &str = "/flow_run_notification_policies/filter";

/// Base endpoint for flow run notification policies
pub const POLICIES_ENDPOINT: &str = "/flow_run_notification_policies";

/// Endpoint for creating automations
pub const AUTOMATIONS_ENDPOINT: &str = "/automations/";

/// Standard headers for Prefect API requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// API version header name understood by Prefect servers
    pub const API_VERSION_HEADER: &str = "x-prefect-api-version";

    /// API version this client speaks
    pub const API_VERSION: &str = "0.8.4";
}
