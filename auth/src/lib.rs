//! Credential issuance and verification library
//!
//! Provides the pieces every login/registration flow is built from:
//! - Password hashing (Argon2id, configurable cost)
//! - Session claims and HS256 token issuance/validation
//! - Authentication coordination
//!
//! Services own their persistence and transport; they adapt these types
//! rather than sharing domain logic through this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionClaims, SessionIdentity, TokenIssuer};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let identity = SessionIdentity {
//!     subject_id: Uuid::new_v4(),
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     display_name: "Alice".to_string(),
//!     role_id: Uuid::new_v4(),
//!     permissions: vec!["post.read".to_string()],
//! };
//! let claims = SessionClaims::for_identity(identity, Duration::minutes(30)).unwrap();
//! let token = issuer.issue(&claims).unwrap();
//! let decoded = issuer.parse(&token).unwrap();
//! assert_eq!(decoded.username, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SessionIdentity};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = SessionIdentity {
//!     subject_id: Uuid::new_v4(),
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     display_name: "Alice".to_string(),
//!     role_id: Uuid::new_v4(),
//!     permissions: vec![],
//! };
//! let result = auth.authenticate("password123", &hash, identity).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert!(claims.permissions.is_empty());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use jwt::SessionIdentity;
pub use jwt::TokenIssuer;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
