use auth::JwtError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for submitted password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password must not be empty")]
    Empty,
}

/// Failures reported by a credential store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Username or email is already taken
    #[error("Credential already exists: {0}")]
    Duplicate(String),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for registration, login and token checks
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Authentication errors
    #[error("No credential found for identifier: {0}")]
    CredentialNotFound(String),

    #[error("Password does not match for identifier: {0}")]
    InvalidCredential(String),

    #[error("Credential already exists: {0}")]
    DuplicateCredential(String),

    #[error("Token rejected: {0}")]
    Token(JwtError),

    // Infrastructure errors
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),
}

impl AuthError {
    /// Whether the error is caused by the submitted input rather than by
    /// infrastructure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidUsername(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidDisplayName(_)
                | AuthError::InvalidPassword(_)
        )
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(identifier) => AuthError::DuplicateCredential(identifier),
            StoreError::Unavailable(reason) => AuthError::StoreUnavailable(reason),
        }
    }
}
