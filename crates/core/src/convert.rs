//! Wire to domain conversion
//!
//! The full resource and the list summary are converted independently but
//! must yield the same `App` for the same application.

use crate::annotations::ObservedAnnotations;
use crate::error::{AppError, Result};
use crate::models::App;
use chrono::{DateTime, Utc};
use fnapps_remote::{Application, ApplicationSummary};

/// Convert a full application resource
pub fn app_from_resource(resource: &Application) -> Result<App> {
    let created_at = parse_timestamp("created_at", resource.time_created.as_deref())?;
    let updated_at = parse_timestamp("updated_at", resource.time_updated.as_deref())?;

    Ok(App {
        id: required("id", resource.id.as_ref())?,
        name: required("name", resource.display_name.as_ref())?,
        config: resource.config.clone().unwrap_or_default(),
        annotations: ObservedAnnotations {
            subnet_ids: resource.subnet_ids.clone().unwrap_or_default(),
            compartment_id: required("compartment_id", resource.compartment_id.as_ref())?,
        },
        created_at,
        updated_at,
    })
}

/// Convert a list summary
///
/// Summaries carry no config; their freeform tags fill that slot.
pub fn app_from_summary(summary: &ApplicationSummary) -> Result<App> {
    let created_at = parse_timestamp("created_at", summary.time_created.as_deref())?;
    let updated_at = parse_timestamp("updated_at", summary.time_updated.as_deref())?;

    Ok(App {
        id: required("id", summary.id.as_ref())?,
        name: required("name", summary.display_name.as_ref())?,
        config: summary.freeform_tags.clone().unwrap_or_default(),
        annotations: ObservedAnnotations {
            subnet_ids: summary.subnet_ids.clone().unwrap_or_default(),
            compartment_id: required("compartment_id", summary.compartment_id.as_ref())?,
        },
        created_at,
        updated_at,
    })
}

/// Convert a page of summaries, failing on the first bad entry
pub fn apps_from_summaries(summaries: &[ApplicationSummary]) -> Result<Vec<App>> {
    summaries.iter().map(app_from_summary).collect()
}

fn required(field: &'static str, value: Option<&String>) -> Result<String> {
    value.cloned().ok_or_else(|| AppError::missing_field(field))
}

fn parse_timestamp(field: &'static str, value: Option<&str>) -> Result<DateTime<Utc>> {
    let value = value.ok_or_else(|| AppError::missing_field(field))?;

    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Conversion {
            field,
            reason: format!("invalid timestamp {value:?}: {e}"),
        })
}
