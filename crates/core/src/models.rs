use crate::annotations::{Annotations, ObservedAnnotations};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Application as reported by the functions service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    pub config: HashMap<String, String>,
    pub annotations: ObservedAnnotations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application to be created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDraft {
    pub name: String,
    #[serde(default)]
    pub config: HashMap<String, String>,
    /// Desired placement; must carry the subnets annotation
    #[serde(default)]
    pub annotations: Annotations,
}

impl AppDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
