use super::schemas::{AppNameInput, CreateAppInput, ListAppsInput, UpdateAppInput};
use fnapps_core::{
    AnnotationValue, AppDraft, AppError, ApplicationService, ANNOTATION_SUBNET,
};
use rmcp::handler::server::{router::tool::ToolRouter, tool::Parameters, ServerHandler};
use rmcp::model::{CallToolResult, Content, ErrorCode, ErrorData as McpError, Implementation, InitializeResult, ProtocolVersion, ServerCapabilities};
use rmcp::service::{QuitReason, RunningService};
use rmcp::{tool, tool_handler, tool_router, RoleServer};
use serde_json::json;
use std::{borrow::Cow, future::Future};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Page cutoff used when `fn_list_apps` is called without a limit
const DEFAULT_LIST_LIMIT: usize = 100;

/// MCP Server exposing functions applications
#[derive(Clone)]
pub struct McpServer {
    service: ApplicationService,
    cancel: CancellationToken,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    /// Create a new MCP server with the given application service
    pub fn new(service: ApplicationService) -> Self {
        Self::with_cancellation(service, CancellationToken::new())
    }

    /// Create a server whose in-flight calls stop when `cancel` fires
    pub fn with_cancellation(service: ApplicationService, cancel: CancellationToken) -> Self {
        Self {
            service,
            cancel,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a new application
    #[tool(description = "Create a new functions application. Requires the subnets the functions run in. Returns the created application.")]
    async fn fn_create_app(
        &self,
        Parameters(input): Parameters<CreateAppInput>,
    ) -> Result<CallToolResult, McpError> {
        info!("Creating application: {}", input.name);

        let mut draft = AppDraft::new(input.name);
        draft.config = input.config;
        draft.annotations.insert(
            ANNOTATION_SUBNET.to_string(),
            AnnotationValue::StringList(input.subnet_ids),
        );

        let app = self
            .service
            .create_app(&draft, &self.cancel.child_token())
            .await
            .map_err(|e| tool_error("Failed to create application", &e))?;

        json_result(&json!({
            "success": true,
            "application": app,
            "message": format!("Successfully created application '{}' with ID {}", app.name, app.id)
        }))
    }

    /// Get an application by name
    #[tool(description = "Get a functions application by name. Returns its ID, config, subnets, compartment and timestamps.")]
    async fn fn_get_app(
        &self,
        Parameters(input): Parameters<AppNameInput>,
    ) -> Result<CallToolResult, McpError> {
        info!("Getting application: {}", input.name);

        let app = self
            .service
            .get_app(&input.name, &self.cancel.child_token())
            .await
            .map_err(|e| tool_error("Failed to get application", &e))?;

        json_result(&json!({
            "success": true,
            "application": app
        }))
    }

    /// Merge config into an application
    #[tool(description = "Update the config of a functions application. Keys with an empty value are removed, others are added or overwritten.")]
    async fn fn_update_app(
        &self,
        Parameters(input): Parameters<UpdateAppInput>,
    ) -> Result<CallToolResult, McpError> {
        info!("Updating application: {}", input.name);

        let cancel = self.cancel.child_token();
        let mut app = self
            .service
            .get_app(&input.name, &cancel)
            .await
            .map_err(|e| tool_error("Failed to update application", &e))?;
        app.config = input.config;

        let app = self
            .service
            .update_app(&app, &cancel)
            .await
            .map_err(|e| tool_error("Failed to update application", &e))?;

        json_result(&json!({
            "success": true,
            "application": app
        }))
    }

    /// Delete an application by name
    #[tool(description = "Delete a functions application by name.")]
    async fn fn_delete_app(
        &self,
        Parameters(input): Parameters<AppNameInput>,
    ) -> Result<CallToolResult, McpError> {
        info!("Deleting application: {}", input.name);

        let cancel = self.cancel.child_token();
        let app = self
            .service
            .get_app(&input.name, &cancel)
            .await
            .map_err(|e| tool_error("Failed to delete application", &e))?;

        self.service
            .delete_app(&app.id, &cancel)
            .await
            .map_err(|e| tool_error("Failed to delete application", &e))?;

        json_result(&json!({
            "success": true,
            "deleted": {
                "id": app.id,
                "name": app.name
            },
            "message": format!("Successfully deleted application '{}'", app.name)
        }))
    }

    /// List applications
    #[tool(description = "List functions applications in the configured compartment. Returns an array of applications and their count.")]
    async fn fn_list_apps(
        &self,
        Parameters(input): Parameters<ListAppsInput>,
    ) -> Result<CallToolResult, McpError> {
        let limit = input.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        info!("Listing applications (limit {})", limit);

        let apps = self
            .service
            .list_apps(limit, &self.cancel.child_token())
            .await
            .map_err(|e| tool_error("Failed to list applications", &e))?;

        json_result(&json!({
            "success": true,
            "applications": apps,
            "count": apps.len()
        }))
    }
}

/// Wait for a running server to finish, stopping it once `shutdown` fires
pub async fn run_until_cancelled(
    service: RunningService<RoleServer, McpServer>,
    shutdown: &CancellationToken,
) -> Result<QuitReason, tokio::task::JoinError> {
    let service_ct = service.cancellation_token();
    let waiting = service.waiting();
    tokio::pin!(waiting);

    tokio::select! {
        biased;
        reason = &mut waiting => reason,
        () = shutdown.cancelled() => {
            info!("Shutting down MCP service");
            service_ct.cancel();
            waiting.await
        }
    }
}

fn json_result(response: &serde_json::Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(response).map_err(|e| McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(format!("Failed to encode response: {e}")),
        data: None,
    })?;

    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn tool_error(context: &str, err: &AppError) -> McpError {
    let code = match err {
        AppError::NotFound { .. }
        | AppError::InvalidArgument(_)
        | AppError::InvalidConfiguration(_) => ErrorCode::INVALID_PARAMS,
        AppError::Conversion { .. } | AppError::Transport(_) => ErrorCode::INTERNAL_ERROR,
    };

    McpError {
        code,
        message: Cow::from(format!("{context}: {err}")),
        data: None,
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::default(),
            server_info: Implementation {
                name: "fnapps".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: None,
        }
    }
}
