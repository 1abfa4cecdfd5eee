use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::credential::errors::AuthError;

pub mod login;
pub mod me;
pub mod register;

/// Message shown whenever credentials are rejected, whatever the reason.
const AUTHENTICATION_FAILED: &str = "Authentication failed";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message.into(), data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_validation() {
            return ApiError::BadRequest(err.to_string());
        }

        match err {
            AuthError::CredentialNotFound(_) | AuthError::InvalidCredential(_) => {
                ApiError::Unauthorized(AUTHENTICATION_FAILED.to_string())
            }
            AuthError::DuplicateCredential(_) => ApiError::Conflict(err.to_string()),
            AuthError::Token(ref e) if e.is_verification_failure() => {
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            // Detail was logged where it happened
            _ => ApiError::InternalServerError("Internal server error".to_string()),
        }
    }
}

/// Message telling the caller how long a fresh token lasts
pub fn token_lifetime_message(expires_in: chrono::Duration) -> String {
    format!(
        "Token will be expired within {} minutes",
        expires_in.num_minutes()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: bool,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: String, data: T) -> Self {
        Self {
            status: true,
            message,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status: bool,
    message: String,
}

impl ApiErrorBody {
    pub fn new(message: String) -> Self {
        Self {
            status: false,
            message,
        }
    }
}
