use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SessionClaims;

use crate::credential::errors::AuthError;
use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::LoginCommand;
use crate::credential::models::RegisterCommand;
use crate::credential::models::RoleId;
use crate::credential::models::SubjectId;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::IssuedToken;

/// Domain service implementation for registration, login and token checks.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no mutable state; the store owns everything that changes.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    default_role: RoleId,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token signing
    /// * `default_role` - Role assigned to newly registered accounts
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>, default_role: RoleId) -> Self {
        Self {
            store,
            authenticator,
            default_role,
        }
    }
}

fn log_store_failure(operation: &'static str, err: &StoreError) {
    match err {
        StoreError::Duplicate(identifier) => {
            tracing::warn!(operation, identifier = %identifier, "Credential already exists")
        }
        StoreError::Unavailable(reason) => {
            tracing::error!(operation, error = %reason, "Credential store failed")
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<IssuedToken, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AuthError::Hashing(e.to_string())
            })?;

        let credential = Credential {
            id: SubjectId::new(),
            username: command.username,
            email: command.email,
            display_name: command.display_name,
            password_hash,
            role_id: self.default_role,
        };

        let created = self.store.insert(credential).await.map_err(|e| {
            log_store_failure("insert", &e);
            AuthError::from(e)
        })?;

        tracing::info!(
            subject_id = %created.id,
            username = %created.username,
            role_id = %created.role_id,
            "Credential registered"
        );

        // From here on the account exists; failures leave it in place for a later login
        let permissions = self
            .store
            .permissions_for_role(&created.role_id)
            .await
            .map_err(|e| {
                log_store_failure("permissions_for_role", &e);
                AuthError::from(e)
            })?;

        let result = self
            .authenticator
            .generate_token(created.session_identity(permissions))
            .map_err(|e| {
                tracing::error!(subject_id = %created.id, error = %e, "Token issuance failed");
                AuthError::TokenIssuance(e.to_string())
            })?;

        Ok(IssuedToken {
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError> {
        let found = self
            .store
            .find_by_identifier(&command.identifier)
            .await
            .map_err(|e| {
                log_store_failure("find_by_identifier", &e);
                AuthError::from(e)
            })?;

        let Some((credential, role)) = found else {
            self.authenticator
                .burn_verification(command.password.expose());
            tracing::warn!(
                identifier = %command.identifier,
                reason = "credential_not_found",
                "Login rejected"
            );
            return Err(AuthError::CredentialNotFound(command.identifier));
        };

        let identity = credential.session_identity(role.permissions);
        let result = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &credential.password_hash,
                identity,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(
                        identifier = %command.identifier,
                        reason = "password_mismatch",
                        "Login rejected"
                    );
                    AuthError::InvalidCredential(command.identifier.clone())
                }
                AuthenticationError::Password(err) => {
                    tracing::error!(error = %err, "Password verification failed");
                    AuthError::Hashing(err.to_string())
                }
                AuthenticationError::Jwt(err) => {
                    tracing::error!(subject_id = %credential.id, error = %err, "Token issuance failed");
                    AuthError::TokenIssuance(err.to_string())
                }
            })?;

        tracing::info!(subject_id = %credential.id, username = %credential.username, "Login succeeded");

        Ok(IssuedToken {
            access_token: result.access_token,
            expires_in: result.expires_in,
        })
    }

    fn authorize(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::Token(e)
        })
    }
}
