//! Request-level error type.
//!
//! Every non-success response except check-email's 404 is a plain-text body
//! carrying the variant's message. Internal failures log their cause and
//! return a fixed message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::auth::{password::PasswordError, repo::StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request method")]
    MethodNotAllowed,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Database error")]
    Store(#[from] StoreError),

    #[error("Failed to hash password")]
    Hash(#[from] PasswordError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidBody | AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::EmailTaken | AppError::Store(StoreError::DuplicateEmail) => {
                StatusCode::CONFLICT
            }
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::EmailNotFound => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Database(_)) | AppError::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(StoreError::Database(e)) => error!(error = %e, "storage failure"),
            AppError::Hash(e) => error!(error = %e, "password hashing failure"),
            _ => {}
        }
        let message = match &self {
            AppError::Store(StoreError::DuplicateEmail) => AppError::EmailTaken.to_string(),
            other => other.to_string(),
        };
        (self.status(), message).into_response()
    }
}
