use fnapps_remote::RemoteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("App {name} not found")]
    NotFound { name: String },

    #[error("Invalid application from service: {field}: {reason}")]
    Conversion { field: &'static str, reason: String },

    #[error(transparent)]
    Transport(#[from] RemoteError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub(crate) fn missing_field(field: &'static str) -> Self {
        AppError::Conversion {
            field,
            reason: "missing required field".to_string(),
        }
    }
}
