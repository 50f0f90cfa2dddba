use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised by the document store and the session cache.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("counter `{field}` holds non-numeric value {value:?}")]
    CorruptCounter { field: &'static str, value: String },

    #[error("document not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Please select a team and enter a username.")]
    MissingSelection,

    #[error("Failed to create user: {0}")]
    Store(#[from] StoreError),
}

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

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

impl From<RegisterError> for AppError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::MissingSelection => Self::bad_request(err.to_string()),
            RegisterError::Store(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to create user. Please try again.".to_string(),
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
