use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ingrescan_core::domain::common::entities::app_errors::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{error}: {message}")]
    BadGateway {
        error: String,
        status: Option<u16>,
        message: String,
    },
}

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    /// Upstream HTTP status, only for detection service failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(self) -> ApiErrorResponse {
        match self {
            ApiError::BadRequest(error)
            | ApiError::PayloadTooLarge(error)
            | ApiError::NotFound(error)
            | ApiError::InternalServerError(error) => ApiErrorResponse {
                error,
                status: None,
                message: None,
            },
            ApiError::BadGateway {
                error,
                status,
                message,
            } => ApiErrorResponse {
                error,
                status,
                message: Some(message),
            },
        }
    }

    pub fn multipart(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingInput(message) | CoreError::UnsupportedFormat(message) => {
                ApiError::BadRequest(message)
            }
            CoreError::FileTooLarge { limit, .. } => {
                ApiError::PayloadTooLarge(format!("Image too large. Max size is {} bytes", limit))
            }
            CoreError::ConfigurationError(message) => {
                ApiError::InternalServerError(format!("Server misconfigured: {}", message))
            }
            CoreError::UpstreamUnavailable(message) => ApiError::BadGateway {
                error: "Detection service unavailable".to_string(),
                status: None,
                message,
            },
            CoreError::UpstreamError { status, body } => ApiError::BadGateway {
                error: "Detection service error".to_string(),
                status: Some(status),
                message: body,
            },
            CoreError::MalformedUpstreamResponse(message) => ApiError::BadGateway {
                error: "Unexpected detection service response".to_string(),
                status: None,
                message,
            },
            CoreError::StorageWriteError(message) => ApiError::InternalServerError(format!(
                "Failed to save processed image: {}",
                message
            )),
            CoreError::StorageReadError(message) => ApiError::InternalServerError(format!(
                "Failed to read processed image: {}",
                message
            )),
            CoreError::NotFound => ApiError::NotFound("Not found".to_string()),
        }
    }
}
