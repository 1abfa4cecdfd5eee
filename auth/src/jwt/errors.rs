use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing key is empty")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token expiry is outside the representable time range")]
    ExpiryOutOfRange,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is signed with an unsupported algorithm")]
    InvalidAlgorithm,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

impl JwtError {
    /// Whether the error comes from checking a presented token rather than
    /// from issuing one.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidSignature
                | JwtError::InvalidAlgorithm
                | JwtError::Expired
                | JwtError::Malformed(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => JwtError::InvalidAlgorithm,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidToken => JwtError::Malformed("Invalid token structure".to_string()),
            ErrorKind::Base64(_) => JwtError::Malformed("Invalid base64 encoding".to_string()),
            ErrorKind::Json(e) => JwtError::Malformed(format!("Invalid claims: {}", e)),
            ErrorKind::Utf8(_) => JwtError::Malformed("Invalid UTF-8 in token".to_string()),
            ErrorKind::MissingRequiredClaim(claim) => {
                JwtError::Malformed(format!("Missing required claim: {}", claim))
            }
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_failures() {
        assert!(JwtError::InvalidSignature.is_verification_failure());
        assert!(JwtError::Expired.is_verification_failure());
        assert!(JwtError::Malformed("x".to_string()).is_verification_failure());
        assert!(!JwtError::MissingSigningKey.is_verification_failure());
        assert!(!JwtError::EncodingFailed("x".to_string()).is_verification_failure());
        assert!(!JwtError::ExpiryOutOfRange.is_verification_failure());
    }
}
