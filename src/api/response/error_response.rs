use crate::api::dto::MessageResponse;
use crate::application::service::session_service::SessionError;
use crate::application::service::user_service::UserServiceError;
use crate::domain::repositories::RepositoryError;
use crate::domain::token::TokenError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::UserNotFound => StatusCode::NOT_FOUND,
            SessionError::BadCredentials => StatusCode::UNAUTHORIZED,
            SessionError::UserDisabled => StatusCode::FORBIDDEN,
            SessionError::Token(TokenError::EncodingFailed) => StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::Token(_) => StatusCode::UNAUTHORIZED,
            SessionError::SessionExpired => StatusCode::UNAUTHORIZED,
            SessionError::Store(_) | SessionError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            SessionError::Store(e) => {
                tracing::error!("Session store error: {}", e);
                message(status, "Internal error")
            }
            SessionError::Repository(e) => {
                tracing::error!("Repository error during authentication: {}", e);
                message(status, "Internal error")
            }
            SessionError::Token(TokenError::Expired) => message(status, "Expired token"),
            SessionError::Token(TokenError::EncodingFailed) => {
                message(status, "Token encoding failed")
            }
            SessionError::Token(_) => message(status, "Invalid token"),
            e => message(status, e.to_string()),
        }
    }
}

impl IntoResponse for UserServiceError {
    fn into_response(self) -> Response {
        match self {
            UserServiceError::InvalidInput(msg) => message(StatusCode::BAD_REQUEST, msg),
            UserServiceError::UsernameTaken => {
                message(StatusCode::CONFLICT, "Username already taken")
            }
            UserServiceError::NotFound => message(StatusCode::NOT_FOUND, "User not found"),
            UserServiceError::Conflict(msg) => message(StatusCode::CONFLICT, msg),
            UserServiceError::Repository(e) => e.into_response(),
            UserServiceError::BatchItem(e) => {
                tracing::error!("Batch processing failed: {}", e);
                message(StatusCode::INTERNAL_SERVER_ERROR, "Batch processing failed")
            }
        }
    }
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        match self {
            RepositoryError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            RepositoryError::Conflict(msg) => message(StatusCode::CONFLICT, msg),
            RepositoryError::Database(e) => {
                tracing::error!("Database error: {}", e);
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
