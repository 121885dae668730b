use crate::error::{status_error, RemoteError, Result};
use crate::models::{
    Application, ApplicationSummary, CreateApplicationDetails, ListApplicationsRequest,
    ListApplicationsResponse, UpdateApplicationDetails,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const API_VERSION: &str = "20181201";
const NEXT_PAGE_HEADER: &str = "opc-next-page";
const REQUEST_ID_HEADER: &str = "opc-request-id";

/// Default functions management endpoint
pub const DEFAULT_ENDPOINT: &str = "https://functions.us-ashburn-1.oci.oraclecloud.com";

/// Application management operations of the functions service
///
/// Each call is a single request. Implementations must give up with
/// [`RemoteError::Cancelled`] once `cancel` fires.
#[async_trait]
pub trait FunctionsManagement: Send + Sync {
    /// Create an application
    async fn create_application(
        &self,
        details: CreateApplicationDetails,
        cancel: &CancellationToken,
    ) -> Result<Application>;

    /// Fetch one page of applications
    async fn list_applications(
        &self,
        request: &ListApplicationsRequest,
        cancel: &CancellationToken,
    ) -> Result<ListApplicationsResponse>;

    /// Get an application by ID
    async fn get_application(&self, id: &str, cancel: &CancellationToken) -> Result<Application>;

    /// Replace the config of an application
    async fn update_application(
        &self,
        id: &str,
        details: UpdateApplicationDetails,
        cancel: &CancellationToken,
    ) -> Result<Application>;

    /// Delete an application by ID
    async fn delete_application(&self, id: &str, cancel: &CancellationToken) -> Result<()>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the functions service
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("fnapps/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `FunctionsManagement` over the service's REST API
///
/// Request signing is expected to happen in front of `endpoint`.
#[derive(Clone)]
pub struct HttpFunctionsClient {
    inner: reqwest::Client,
    applications_url: Url,
}

impl HttpFunctionsClient {
    /// Create a new client for the configured endpoint
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let applications_url = applications_url(&config.endpoint)?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RemoteError::Build(e.to_string()))?;

        debug!("Functions client targeting {}", applications_url);

        Ok(Self {
            inner,
            applications_url,
        })
    }

    fn application_url(&self, id: &str) -> Result<Url> {
        let mut url = self.applications_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidEndpoint(self.applications_url.to_string()))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let request = request.header(REQUEST_ID_HEADER, &request_id);

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(RemoteError::Cancelled),
            response = request.send() => response?,
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(RemoteError::Cancelled),
            body = response.text() => body.unwrap_or_else(|e| {
                warn!("Failed to read error body of request {}: {}", request_id, e);
                String::new()
            }),
        };
        warn!(
            "Functions request {} failed with status {}",
            request_id,
            status.as_u16()
        );
        Err(status_error(status.as_u16(), &body))
    }
}

fn applications_url(endpoint: &str) -> Result<Url> {
    let mut url =
        Url::parse(endpoint).map_err(|e| RemoteError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(RemoteError::InvalidEndpoint(format!(
            "{endpoint}: scheme must be http or https"
        )));
    }

    url.path_segments_mut()
        .map_err(|()| RemoteError::InvalidEndpoint(endpoint.to_string()))?
        .pop_if_empty()
        .extend([API_VERSION, "applications"]);

    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: Response, cancel: &CancellationToken) -> Result<T> {
    let bytes = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(RemoteError::Cancelled),
        bytes = response.bytes() => bytes?,
    };
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl FunctionsManagement for HttpFunctionsClient {
    async fn create_application(
        &self,
        details: CreateApplicationDetails,
        cancel: &CancellationToken,
    ) -> Result<Application> {
        debug!("POST {}", self.applications_url);
        let request = self.inner.post(self.applications_url.clone()).json(&details);
        let response = self.send(request, cancel).await?;
        read_json(response, cancel).await
    }

    async fn list_applications(
        &self,
        request: &ListApplicationsRequest,
        cancel: &CancellationToken,
    ) -> Result<ListApplicationsResponse> {
        debug!("GET {} (page: {:?})", self.applications_url, request.page);
        let builder = self
            .inner
            .get(self.applications_url.clone())
            .query(&request.query());
        let response = self.send(builder, cancel).await?;

        let opc_next_page = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let items: Vec<ApplicationSummary> = read_json(response, cancel).await?;

        Ok(ListApplicationsResponse {
            items,
            opc_next_page,
        })
    }

    async fn get_application(&self, id: &str, cancel: &CancellationToken) -> Result<Application> {
        let url = self.application_url(id)?;
        debug!("GET {}", url);
        let response = self.send(self.inner.get(url), cancel).await?;
        read_json(response, cancel).await
    }

    async fn update_application(
        &self,
        id: &str,
        details: UpdateApplicationDetails,
        cancel: &CancellationToken,
    ) -> Result<Application> {
        let url = self.application_url(id)?;
        debug!("PUT {}", url);
        let response = self.send(self.inner.put(url).json(&details), cancel).await?;
        read_json(response, cancel).await
    }

    async fn delete_application(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let url = self.application_url(id)?;
        debug!("DELETE {}", url);
        self.send(self.inner.delete(url), cancel).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applications_url() {
        let url = applications_url("https://functions.example.com").unwrap();
        assert_eq!(
            url.as_str(),
            "https://functions.example.com/20181201/applications"
        );

        // Trailing slash and path prefix are preserved
        let url = applications_url("http://localhost:8080/proxy/").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/20181201/applications"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            applications_url("not a url"),
            Err(RemoteError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            applications_url("ftp://functions.example.com"),
            Err(RemoteError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_application_url_appends_id() {
        let client = HttpFunctionsClient::new(&ClientConfig {
            endpoint: "https://functions.example.com".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();

        let url = client.application_url("ocid1.fnapp.oc1..aaa").unwrap();
        assert_eq!(
            url.as_str(),
            "https://functions.example.com/20181201/applications/ocid1.fnapp.oc1..aaa"
        );
    }
}
