use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                StatusCode::NOT_FOUND
            }
            ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedMedia(_) => Self::bad_request(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failures talking to the mood backend or the geocoder.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid backend url: {0}")]
    Url(String),

    #[error("request cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unsupported media type for profile picture: {0}")]
    UnsupportedMedia(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("more than one mood entry recorded for {0}")]
    DuplicateDate(String),
}
