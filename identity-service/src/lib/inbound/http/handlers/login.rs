use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::token_lifetime_message;
use super::ApiError;
use super::ApiSuccess;
use crate::credential::models::LoginCommand;
use crate::credential::models::Password;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::extract::FormBody;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    FormBody(body): FormBody<LoginRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    let (identifier, password) = body.try_into_parts()?;

    state
        .auth_service
        .login(LoginCommand::new(identifier, password))
        .await
        .map_err(ApiError::from)
        .map(|issued| {
            ApiSuccess::new(
                StatusCode::OK,
                token_lifetime_message(issued.expires_in),
                issued.access_token,
            )
        })
}

/// Form body for logging in, urlencoded or multipart.
///
/// The identifier may arrive as `username` or `username_or_email`. A
/// non-empty `username` wins when both are sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    username_or_email: Option<String>,
    password: String,
}

impl LoginRequest {
    fn try_into_parts(self) -> Result<(String, Password), ApiError> {
        let identifier = self
            .username
            .filter(|username| !username.is_empty())
            .or(self.username_or_email)
            .unwrap_or_default();

        if identifier.is_empty() {
            return Err(ApiError::BadRequest(
                "Username or email must not be empty".to_string(),
            ));
        }

        let password = Password::new(self.password)
            .map_err(|e| ApiError::BadRequest(format!("Invalid password: {}", e)))?;

        Ok((identifier, password))
    }
}
