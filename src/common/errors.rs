use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use std::fmt;

/// Error type for the hand-written workflow routes. The crudcrate-generated
/// routes map `DbErr` themselves; these variants cover the composite handlers
/// (report save, tender origination, winner selection, delivery order).
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: String, id: String },
    /// User input rejected (422)
    Validation { message: String },
    /// Conflicting state, e.g. unique constraint hit (409)
    Conflict { message: String },
    /// Anything else from the database layer (500)
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { resource, id } => {
                write!(f, "{resource} with id '{id}' not found")
            }
            ApiError::Validation { message } => write!(f, "Validation error: {message}"),
            ApiError::Conflict { message } => write!(f, "Conflict: {message}"),
            ApiError::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => ApiError::NotFound {
                resource: msg,
                id: String::new(),
            },
            DbErr::Exec(exec_err) => {
                let msg = exec_err.to_string();
                if msg.contains("UNIQUE constraint") || msg.contains("duplicate key") {
                    ApiError::Conflict { message: msg }
                } else {
                    ApiError::Internal { message: msg }
                }
            }
            other => ApiError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            ApiError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
