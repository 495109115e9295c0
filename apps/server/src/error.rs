//! Error types for the search server
//!
//! Three families cross the request boundary:
//! - `Validation`: the client sent unusable parameters (400)
//! - `Storage`: PostgreSQL or the connection pool failed (500, or 400 for data exceptions)
//! - `Internal`: a row or response could not be shaped (500)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Client-caused rejections produced by the input validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing or invalid 'q' query parameter")]
    MissingQuery,

    #[error("Invalid limit parameter. Must be between {min} and {max}.")]
    InvalidLimit { min: usize, max: usize },
}

/// Failures raised while talking to PostgreSQL.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Timed out waiting for a database connection")]
    Timeout,

    /// SQLSTATE class 22: the engine rejected a value, typically malformed text-search input.
    #[error("Invalid search query format: {0}")]
    DataFormat(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => StorageError::Timeout,
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|code| code.starts_with("22")) =>
            {
                StorageError::DataFormat(err)
            }
            _ => StorageError::Database(err),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Decoding failures mean the row shape disagrees with our model, not that the
            // store is unhealthy.
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Error::Internal(err.to_string()),
            other => Error::Storage(StorageError::from(other)),
        }
    }
}

impl StorageError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::Timeout => "timeout",
            StorageError::DataFormat(_) => "data_format",
            StorageError::Database(_) => "database",
        }
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Storage(StorageError::DataFormat(_)) => StatusCode::BAD_REQUEST,
            Error::Storage(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the client.
    fn public_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Storage(StorageError::DataFormat(_)) => "Invalid search query format".to_string(),
            Error::Storage(_) | Error::Internal(_) => {
                "Internal server error while searching".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Search request failed");
        } else {
            tracing::debug!(error = %self, "Search request rejected");
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}
