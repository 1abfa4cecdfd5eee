use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::token_lifetime_message;
use super::ApiError;
use super::ApiSuccess;
use crate::credential::errors::DisplayNameError;
use crate::credential::errors::EmailError;
use crate::credential::errors::PasswordInputError;
use crate::credential::errors::UsernameError;
use crate::credential::models::DisplayName;
use crate::credential::models::EmailAddress;
use crate::credential::models::Password;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Username;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::extract::FormBody;
use crate::inbound::http::router::AppState;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    FormBody(body): FormBody<RegisterRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
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

/// Form body for registering an account (raw fields), urlencoded or multipart
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    DisplayName(#[from] DisplayNameError),

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordInputError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let display_name = DisplayName::new(self.name)?;
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(display_name, username, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
