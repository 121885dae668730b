use crate::annotations::parse_subnet_ids;
use crate::config::{ConfigProvider, COMPARTMENT_ID_KEY};
use crate::convert::{app_from_resource, apps_from_summaries};
use crate::diagnostics::{Diagnostics, StderrDiagnostics};
use crate::error::{AppError, Result};
use crate::models::{App, AppDraft};
use fnapps_remote::{
    CreateApplicationDetails, FunctionsManagement, ListApplicationsRequest,
    UpdateApplicationDetails,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Diagnostic emitted when a listing comes back empty
pub const NO_APPS_FOUND: &str = "No apps found";

/// Service for application-related business logic
///
/// Translates domain applications into calls against the functions
/// management API and converts the responses back. Holds no state between
/// calls; every operation is a fresh round trip.
#[derive(Clone)]
pub struct ApplicationService {
    client: Arc<dyn FunctionsManagement>,
    config: Arc<dyn ConfigProvider>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ApplicationService {
    /// Create a new `ApplicationService` reporting diagnostics on stderr
    #[must_use]
    pub fn new(client: Arc<dyn FunctionsManagement>, config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            client,
            config,
            diagnostics: Arc::new(StderrDiagnostics),
        }
    }

    /// Replace the diagnostic channel
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Create a new application
    ///
    /// # Arguments
    /// * `draft` - Name, config and annotations; the annotations must carry
    ///   `oracle.com/oci/subnetIds` as a list of strings
    ///
    /// # Returns
    /// * `Ok(App)` - The application as created by the service
    /// * `Err(AppError::InvalidArgument)` - Name is empty
    /// * `Err(AppError::InvalidConfiguration)` - Subnets annotation missing or
    ///   malformed, or no compartment configured
    ///
    /// # Examples
    /// ```ignore
    /// let mut draft = AppDraft::new("my-app");
    /// draft.annotations.insert(ANNOTATION_SUBNET.to_string(), vec![subnet].into());
    /// let app = service.create_app(&draft, &CancellationToken::new()).await?;
    /// println!("Created app: {} with id {}", app.name, app.id);
    /// ```
    pub async fn create_app(&self, draft: &AppDraft, cancel: &CancellationToken) -> Result<App> {
        if draft.name.is_empty() {
            return Err(AppError::InvalidArgument("app name is required".to_string()));
        }

        let subnet_ids = parse_subnet_ids(&draft.annotations)?;
        let compartment_id = self.compartment_id()?;

        info!("Creating application {} in {}", draft.name, compartment_id);

        let details = CreateApplicationDetails {
            compartment_id,
            display_name: draft.name.clone(),
            config: stored_config(&draft.config),
            subnet_ids,
        };

        let created = self.client.create_application(details, cancel).await?;
        app_from_resource(&created)
    }

    /// Get application by name
    ///
    /// The service has no lookup by name, so this lists with a name filter
    /// and fetches the first match.
    pub async fn get_app(&self, name: &str, cancel: &CancellationToken) -> Result<App> {
        let compartment_id = self.compartment_id()?;
        let request = ListApplicationsRequest::in_compartment(compartment_id).with_display_name(name);

        let page = self.client.list_applications(&request, cancel).await?;
        let Some(first) = page.items.first() else {
            return Err(AppError::NotFound {
                name: name.to_string(),
            });
        };

        if page.items.len() > 1 {
            warn!(
                "{} applications named {}, using the first",
                page.items.len(),
                name
            );
        }

        let id = first
            .id
            .as_deref()
            .ok_or_else(|| AppError::missing_field("id"))?;
        debug!("Resolved application {} to {}", name, id);

        let resource = self.client.get_application(id, cancel).await?;
        app_from_resource(&resource)
    }

    /// Merge-patch the config of an application
    ///
    /// Only `app.config` is sent. Entries with an empty value are dropped
    /// from the request; all others are added or overwritten.
    pub async fn update_app(&self, app: &App, cancel: &CancellationToken) -> Result<App> {
        if app.id.is_empty() {
            return Err(AppError::InvalidArgument("app ID is required".to_string()));
        }

        let details = UpdateApplicationDetails {
            config: stored_config(&app.config),
        };
        info!(
            "Updating application {} ({} config keys)",
            app.id,
            details.config.len()
        );

        let updated = self
            .client
            .update_application(&app.id, details, cancel)
            .await?;
        app_from_resource(&updated)
    }

    /// Delete application by ID
    ///
    /// Deleting an ID that no longer exists fails with the service's own
    /// not-found error.
    pub async fn delete_app(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        if id.is_empty() {
            return Err(AppError::InvalidArgument("app ID is required".to_string()));
        }

        info!("Deleting application {}", id);
        self.client.delete_application(id, cancel).await?;
        Ok(())
    }

    /// List applications, following page cursors until `limit` is reached
    ///
    /// The cutoff compares `limit` against the accumulated count plus the
    /// size of the page just appended, so a page is counted twice and the
    /// result may stop short of `limit`. The result is never truncated.
    /// An empty result is not an error; it emits [`NO_APPS_FOUND`] on the
    /// diagnostic channel instead.
    pub async fn list_apps(&self, limit: usize, cancel: &CancellationToken) -> Result<Vec<App>> {
        let compartment_id = self.compartment_id()?;
        let mut request = ListApplicationsRequest::in_compartment(compartment_id);
        let mut apps = Vec::new();

        loop {
            let page = self.client.list_applications(&request, cancel).await?;
            let page_len = page.items.len();
            apps.extend(apps_from_summaries(&page.items)?);

            debug!("Fetched {} applications ({} total)", page_len, apps.len());

            match page.opc_next_page {
                Some(next) if apps.len() + page_len < limit => request.page = Some(next),
                _ => break,
            }
        }

        if apps.is_empty() {
            self.diagnostics.notice(NO_APPS_FOUND);
        }

        Ok(apps)
    }

    fn compartment_id(&self) -> Result<String> {
        let compartment_id = self.config.get_string(COMPARTMENT_ID_KEY);
        if compartment_id.is_empty() {
            return Err(AppError::InvalidConfiguration(format!(
                "{COMPARTMENT_ID_KEY} is not set"
            )));
        }
        Ok(compartment_id)
    }
}

/// Config entries to transmit; empty values mark removals and are dropped
fn stored_config(config: &HashMap<String, String>) -> HashMap<String, String> {
    config
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
