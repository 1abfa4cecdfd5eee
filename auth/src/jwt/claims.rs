use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Who a session is issued for.
///
/// Everything that goes into [`SessionClaims`] except the expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub subject_id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role_id: Uuid,
    /// Permission names in the order the store returned them
    pub permissions: Vec<String>,
}

/// Claims carried by a session token.
///
/// Fixed shape: unknown fields, missing fields and ill-typed fields are all
/// rejected when a token is parsed. Field names on the wire follow the
/// token format consumers already rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionClaims {
    #[serde(rename = "user_id")]
    pub subject_id: Uuid,

    pub username: String,

    pub email: String,

    #[serde(rename = "name")]
    pub display_name: String,

    #[serde(rename = "role_uuid")]
    pub role_id: Uuid,

    #[serde(rename = "permission")]
    pub permissions: Vec<String>,

    /// Expiration time, Unix seconds on the wire
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Build claims for an identity, expiring `ttl` after `now`.
    ///
    /// # Arguments
    /// * `identity` - Subject and authorization data
    /// * `ttl` - Session lifetime
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `ExpiryOutOfRange` - `now + ttl` is not a representable instant
    pub fn issued_at(
        identity: SessionIdentity,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, JwtError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(JwtError::ExpiryOutOfRange)?;

        Ok(Self {
            subject_id: identity.subject_id,
            username: identity.username,
            email: identity.email,
            display_name: identity.display_name,
            role_id: identity.role_id,
            permissions: identity.permissions,
            expires_at,
        })
    }

    /// Build claims for an identity, expiring `ttl` from the current time.
    ///
    /// # Errors
    /// See [`SessionClaims::issued_at`].
    pub fn for_identity(identity: SessionIdentity, ttl: Duration) -> Result<Self, JwtError> {
        Self::issued_at(identity, ttl, Utc::now())
    }

    /// Check if the session is expired at `now`.
    ///
    /// The expiry instant itself is already outside the session.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at.timestamp()
    }
}
