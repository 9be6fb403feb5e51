use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{response::ApiResponse, store::StoreError, validation::FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing record, or one that belongs to another user.
    #[error("Not Found")]
    NotFound,

    #[error("Validation failed")]
    Validation(FormRejection),

    #[error("Invalid login or password")]
    InvalidCredentials(FormRejection),

    #[error("Store error")]
    Store(#[from] StoreError),

    #[error("Session error")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

/// The submitted input echoed back with what was wrong with it.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormRejection {
    #[schema(value_type = Object)]
    pub form: serde_json::Value,
    pub errors: FieldErrors,
}

impl FormRejection {
    pub fn new<F: Serialize>(form: &F, errors: FieldErrors) -> Self {
        Self {
            form: serde_json::to_value(form).unwrap_or_default(),
            errors,
        }
    }
}

impl AppError {
    pub fn invalid<F: Serialize>(form: &F, errors: FieldErrors) -> Self {
        AppError::Validation(FormRejection::new(form, errors))
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(rejection) | AppError::InvalidCredentials(rejection) => {
                Some(&rejection.errors)
            }
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();

        match self {
            AppError::Validation(rejection) | AppError::InvalidCredentials(rejection) => {
                (status, axum::Json(ApiResponse::success(message, rejection))).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = ?other, "request failed");
                }
                let body = ApiResponse::success(
                    message,
                    ErrorData {
                        error: other.to_string(),
                    },
                );
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
