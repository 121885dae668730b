use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Full application resource, as returned by create, get and update
///
/// Every field is optional on the wire; required-ness is enforced by
/// whoever converts this into a domain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeform_tags: Option<HashMap<String, String>>,
    /// RFC-3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
    /// RFC-3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<String>,
}

/// Application entry of a list response; carries no `config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeform_tags: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_updated: Option<String>,
}

/// Body of a create request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDetails {
    pub compartment_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, String>,
    pub subnet_ids: Vec<String>,
}

/// Body of an update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationDetails {
    pub config: HashMap<String, String>,
}

/// Query of a list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListApplicationsRequest {
    pub compartment_id: String,
    /// Exact display name filter
    pub display_name: Option<String>,
    /// Opaque cursor from a previous response
    pub page: Option<String>,
    /// Page size hint
    pub limit: Option<u32>,
}

/// One page of a list response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListApplicationsResponse {
    pub items: Vec<ApplicationSummary>,
    /// Cursor for the next page, `None` on the last page
    pub opc_next_page: Option<String>,
}

impl ListApplicationsRequest {
    /// List every application in a compartment
    #[must_use]
    pub fn in_compartment(compartment_id: impl Into<String>) -> Self {
        Self {
            compartment_id: compartment_id.into(),
            ..Self::default()
        }
    }

    /// Restrict the listing to an exact display name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("compartmentId", self.compartment_id.clone())];
        if let Some(name) = &self.display_name {
            query.push(("displayName", name.clone()));
        }
        if let Some(page) = &self.page {
            query.push(("page", page.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}
