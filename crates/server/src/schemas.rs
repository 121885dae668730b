use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input schema for `fn_create_app` tool
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreateAppInput {
    #[schemars(description = "Application display name.")]
    pub name: String,

    #[schemars(description = "Configuration passed to every function of the application. Keys with empty values are not stored.")]
    #[serde(default)]
    pub config: HashMap<String, String>,

    #[schemars(description = "OCIDs of the subnets the application's functions run in.")]
    pub subnet_ids: Vec<String>,
}

/// Input schema for `fn_get_app` and `fn_delete_app` tools
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AppNameInput {
    #[schemars(description = "Application display name.")]
    pub name: String,
}

/// Input schema for `fn_update_app` tool
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct UpdateAppInput {
    #[schemars(description = "Application display name.")]
    pub name: String,

    #[schemars(description = "Configuration to merge. A key with an empty value is removed; other keys are added or overwritten.")]
    pub config: HashMap<String, String>,
}

/// Input schema for `fn_list_apps` tool
#[derive(Debug, Default, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListAppsInput {
    #[schemars(description = "Stop paging once roughly this many applications were fetched (default 100).")]
    #[serde(default)]
    pub limit: Option<usize>,
}
