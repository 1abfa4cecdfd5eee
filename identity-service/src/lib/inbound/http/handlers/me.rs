use auth::SessionClaims;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;

/// Echo the claims of the presented session token.
pub async fn me(
    Extension(claims): Extension<SessionClaims>,
) -> Result<ApiSuccess<SessionClaims>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, "Authenticated", claims))
}
