use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// Session token issuer and verifier.
///
/// Signs [`SessionClaims`] as HS256 JWTs and accepts nothing but HS256 back.
/// Keys are fixed at construction, so one issuer can be shared across tasks.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Sign claims into a token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims, checking expiry against the
    /// current time.
    ///
    /// # Errors
    /// See [`TokenIssuer::parse_at`].
    pub fn parse(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.parse_at(token, Utc::now())
    }

    /// Verify a token and return its claims, checking expiry against `now`.
    ///
    /// # Errors
    /// * `InvalidAlgorithm` - Header names an algorithm other than HS256
    /// * `InvalidSignature` - Signature does not match the signing key
    /// * `Malformed` - Token structure or claims are missing, ill-typed or unknown
    /// * `Expired` - `now` is at or past the expiry
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = vec![self.algorithm];
        // Expiry is checked below against the supplied clock, without leeway
        validation.validate_exp = false;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
