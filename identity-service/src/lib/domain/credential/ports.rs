use async_trait::async_trait;
use auth::SessionClaims;

use crate::credential::errors::AuthError;
use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::LoginCommand;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Role;
use crate::credential::models::RoleId;

/// Token handed back after a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: chrono::Duration,
}

/// Port for credential issuance and verification.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and open its first session.
    ///
    /// # Arguments
    /// * `command` - Validated name, username, email and password
    ///
    /// # Returns
    /// Session token for the new account
    ///
    /// # Errors
    /// * `DuplicateCredential` - Username or email is already registered
    /// * `StoreUnavailable` - Credential store failed
    /// * `Hashing` - Password hashing failed
    /// * `TokenIssuance` - Token signing failed (the account stays registered)
    async fn register(&self, command: RegisterCommand) -> Result<IssuedToken, AuthError>;

    /// Authenticate with a username or email and a password.
    ///
    /// # Arguments
    /// * `command` - Identifier and password
    ///
    /// # Returns
    /// Session token
    ///
    /// # Errors
    /// * `CredentialNotFound` - No account for the identifier
    /// * `InvalidCredential` - Password does not match
    /// * `StoreUnavailable` - Credential store failed
    /// * `TokenIssuance` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError>;

    /// Verify a presented bearer token.
    ///
    /// # Errors
    /// * `Token` - Signature, algorithm, structure or expiry check failed
    fn authorize(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Persistence operations for credentials and their roles.
///
/// Implementations must enforce uniqueness of username and email themselves;
/// concurrent inserts of the same identifier yield exactly one success.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential by username or email, with its role.
    ///
    /// # Returns
    /// Credential and role (None if no account matches)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<(Credential, Role)>, StoreError>;

    /// Persist a new credential.
    ///
    /// # Returns
    /// The stored credential
    ///
    /// # Errors
    /// * `Duplicate` - Username or email is already taken
    /// * `Unavailable` - Storage operation failed
    async fn insert(&self, credential: Credential) -> Result<Credential, StoreError>;

    /// Permission names granted to a role.
    ///
    /// # Returns
    /// Permission names (empty if the role grants nothing)
    ///
    /// # Errors
    /// * `Unavailable` - Storage operation failed
    async fn permissions_for_role(&self, role_id: &RoleId) -> Result<Vec<String>, StoreError>;
}
