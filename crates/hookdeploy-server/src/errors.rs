//! Server errors.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use hookdeploy_core::DeployError;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {source}")]
    IoError { source: std::io::Error },

    #[error("Could not set up metrics: {source}")]
    MetricsError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unhandled event '{event}'")]
    UnhandledEvent { event: String },

    #[error(transparent)]
    DeployError { source: DeployError },
}

impl From<DeployError> for ServerError {
    fn from(e: DeployError) -> Self {
        Self::DeployError { source: e }
    }
}

impl From<prometheus::Error> for ServerError {
    fn from(e: prometheus::Error) -> Self {
        Self::MetricsError { source: e.into() }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DeployError {
                source: DeployError::MissingSignature,
            } => StatusCode::UNAUTHORIZED,
            Self::DeployError {
                source: DeployError::InvalidSignature,
            } => StatusCode::FORBIDDEN,
            Self::DeployError { .. } | Self::UnhandledEvent { .. } => StatusCode::BAD_REQUEST,
            Self::IoError { .. } | Self::MetricsError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
