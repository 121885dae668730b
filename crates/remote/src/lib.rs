mod client;
mod error;
mod models;

pub use client::{ClientConfig, FunctionsManagement, HttpFunctionsClient, DEFAULT_ENDPOINT};
pub use error::{RemoteError, Result};
pub use models::{
    Application, ApplicationSummary, CreateApplicationDetails, ListApplicationsRequest,
    ListApplicationsResponse, UpdateApplicationDetails,
};
