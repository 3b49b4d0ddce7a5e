// src/errors.rs

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Validation errors")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    UnprocessableEntity(String),

    #[error("Invalid email or password")]
    InvalidLoginCredentials,

    #[error("Not logged in: {0}")]
    Unauthenticated(String),

    #[error("Access denied: {0}")]
    UnauthorizedAccess(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Human readable message, the same text the JSON body carries.
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => validation_message(errors),
            AppError::UnprocessableEntity(message)
            | AppError::Unauthenticated(message)
            | AppError::UnauthorizedAccess(message)
            | AppError::BadRequest(message) => message.clone(),
            AppError::InvalidLoginCredentials => "Invalid email or password".to_string(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::Storage(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::InternalServerError(_) => "Internal server error".to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::UnprocessableEntity(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::InvalidLoginCredentials | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::UnauthorizedAccess(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flattens field and struct level validation errors into `Field 'x': message; ...`.
/// Fields are sorted so the message is stable between runs.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let msg = match error.message.as_ref() {
                Some(m) if field == "__all__" => m.to_string(),
                Some(m) => format!("Field '{}': {}", field, m),
                None => format!("Field '{}' is invalid", field),
            };
            messages.push(msg);
        }
    }
    messages.join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:?}", self);
        }
        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::error!("Multipart processing failed: {:?}", err);
        AppError::UnprocessableEntity(format!("Could not read form data: {}", err))
    }
}
