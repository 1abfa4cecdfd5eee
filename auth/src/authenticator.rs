use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::jwt::SessionIdentity;
use crate::jwt::TokenIssuer;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the hashing cost, signing keys and session lifetime. Immutable once
/// built, so a single instance is shared (behind `Arc`) by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    session_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Lifetime of the token from the moment it was issued
    pub expires_in: Duration,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the baseline hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `session_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `Jwt(MissingSigningKey)` - Secret is empty
    pub fn new(jwt_secret: &[u8], session_ttl: Duration) -> Result<Self, AuthenticationError> {
        Self::with_cost(jwt_secret, session_ttl, HashCost::default())
    }

    /// Create a new authenticator with a custom hashing cost.
    ///
    /// # Errors
    /// * `Jwt(MissingSigningKey)` - Secret is empty
    /// * `Password(InvalidParameters)` - Cost is rejected by Argon2
    pub fn with_cost(
        jwt_secret: &[u8],
        session_ttl: Duration,
        cost: HashCost,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_cost(cost)?,
            token_issuer: TokenIssuer::new(jwt_secret)?,
            session_ttl,
        })
    }

    /// Lifetime given to every issued token.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Spend the same work as a password verification without checking anything.
    ///
    /// Used when there is no stored hash to verify against, so that a missing
    /// account takes as long to reject as a wrong password.
    pub fn burn_verification(&self, password: &str) {
        if let Err(e) = self.password_hasher.hash(password) {
            tracing::warn!(error = %e, "Dummy verification failed, timing is not equalized");
        }
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Subject and authorization data for the session
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Jwt` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: SessionIdentity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.generate_token(identity)?)
    }

    /// Generate a token without password verification.
    ///
    /// For flows where the caller already established the identity, such as
    /// issuing the first session right after registration.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        identity: SessionIdentity,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = SessionClaims::for_identity(identity, self.session_ttl)?;
        let access_token = self.token_issuer.issue(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.session_ttl,
        })
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.token_issuer.parse(token)
    }
}
