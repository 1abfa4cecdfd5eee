pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::SessionClaims;
pub use claims::SessionIdentity;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
