use crate::api::dto::MessageResponse;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::Json;

#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Identity resolved by the session gate and attached to the request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject_id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<MessageResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::new("Authorization header is missing")),
            ));
        };

        let value = value.to_str().unwrap_or_default();
        match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(BearerToken(token.trim().to_string())),
            _ => {
                tracing::debug!("Invalid Authorization header");

                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(MessageResponse::new("Missing bearer token")),
                ))
            }
        }
    }
}
