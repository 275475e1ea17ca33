use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A write failed and its transaction was rolled back.
    #[error("Persistence error: {0}")]
    Persistence(sea_orm::DbErr),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A show points at an artist or venue that no longer exists.
    #[error("Referential lookup failed: {0}")]
    ReferentialLookup(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) | Self::ReferentialLookup(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Persistence(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to a user. Store failures are logged here and
    /// replaced with a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error occurred".to_string()
            }
            Self::Persistence(e) => {
                tracing::error!("Persistence error: {}", e);
                "The change could not be saved".to_string()
            }
            Self::Validation(errors) => errors.to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::ReferentialLookup(msg) => {
                tracing::warn!("Referential lookup failed: {}", msg);
                msg.clone()
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg.clone()
            }
            Self::Other(e) => {
                tracing::error!("Unexpected error: {}", e);
                "An unexpected error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.public_message();

        let body = match &self {
            Self::Validation(errors) => Json(json!({
                "error": "Validation failed",
                "details": error_message,
                "fields": errors.fields(),
            })),
            _ => Json(json!({
                "error": error_message,
                "details": self.to_string(),
            })),
        };

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
