use axum::async_trait;
use axum::extract::FromRequest;
use axum::extract::Multipart;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use super::handlers::ApiError;

/// Form body extractor accepting both `application/x-www-form-urlencoded`
/// and `multipart/form-data`.
///
/// Multipart text fields are collected by name and deserialized into `T` the
/// same way an urlencoded body is. A repeated field name keeps the last value.
pub struct FormBody<T>(pub T);

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Ok(FormBody(value));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut fields = Map::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read multipart field");
            ApiError::BadRequest("Invalid multipart data".to_string())
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let text = field
                .text()
                .await
                .map_err(|_| ApiError::BadRequest(format!("Invalid multipart field: {}", name)))?;
            fields.insert(name, Value::String(text));
        }

        let value = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ApiError::BadRequest(format!("Failed to deserialize form body: {}", e))
        })?;

        Ok(FormBody(value))
    }
}
